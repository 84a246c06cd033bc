//! Application wiring.

use snip_config::{AppConfig, StoreBackend};
use snip_core::{Category, Entity, SnipError, SnipResult, Snippet, User};
use snip_repository::metrics::register_metrics;
use snip_repository::{
    create_redis_pool, CollectionDao, CollectionDaoOptions, Dao, Managed, MemoryDao, RedisStore,
    RemoteStore,
};
use snip_service::{
    AccountService, AccountServiceImpl, PasswordHasher, SnippetService, SnippetServiceImpl,
};
use std::sync::Arc;
use tracing::{info, warn};

/// One DAO per collection, plus the lifecycle handles of those that have one.
struct Collections {
    categories: Arc<dyn Dao<Category>>,
    snippets: Arc<dyn Dao<Snippet>>,
    users: Arc<dyn Dao<User>>,
    managed: Vec<Arc<dyn Managed>>,
}

impl Collections {
    fn in_memory() -> Self {
        Self {
            categories: Arc::new(MemoryDao::<Category>::new()),
            snippets: Arc::new(MemoryDao::<Snippet>::new()),
            users: Arc::new(MemoryDao::<User>::new()),
            managed: Vec::new(),
        }
    }

    fn cached(store: &Arc<dyn RemoteStore>, options: CollectionDaoOptions) -> Self {
        let mut managed: Vec<Arc<dyn Managed>> = Vec::new();
        let categories = cached_dao::<Category>(store, options, &mut managed);
        let snippets = cached_dao::<Snippet>(store, options, &mut managed);
        let users = cached_dao::<User>(store, options, &mut managed);
        Self {
            categories,
            snippets,
            users,
            managed,
        }
    }
}

fn cached_dao<T: Entity>(
    store: &Arc<dyn RemoteStore>,
    options: CollectionDaoOptions,
    managed: &mut Vec<Arc<dyn Managed>>,
) -> Arc<dyn Dao<T>> {
    let dao = Arc::new(CollectionDao::<T>::new(Arc::clone(store), options));
    managed.push(dao.clone());
    dao
}

/// The assembled server: collections, services and their lifecycle.
pub struct Application {
    config: AppConfig,
    collections: Collections,
    snippet_service: Arc<dyn SnippetService>,
    account_service: Arc<dyn AccountService>,
}

impl Application {
    /// Builds the application for the configured backend.
    ///
    /// The redis backend connects to Redis before returning.
    pub async fn build(config: &AppConfig) -> SnipResult<Self> {
        let collections = match config.store.backend {
            StoreBackend::Memory => {
                info!("Using in-memory collections");
                Collections::in_memory()
            }
            StoreBackend::Redis => {
                let pool = create_redis_pool(&config.redis).await?;
                let store: Arc<dyn RemoteStore> =
                    Arc::new(RedisStore::new(pool, config.redis.key_prefix.clone()));
                info!(prefix = %config.redis.key_prefix, "Using Redis-backed cached collections");
                Collections::cached(&store, CollectionDaoOptions::from(&config.cache))
            }
        };
        Ok(Self::assemble(config, collections))
    }

    /// Builds the application with cached collections over `store`.
    #[must_use]
    pub fn with_store(config: &AppConfig, store: Arc<dyn RemoteStore>) -> Self {
        let collections = Collections::cached(&store, CollectionDaoOptions::from(&config.cache));
        Self::assemble(config, collections)
    }

    fn assemble(config: &AppConfig, collections: Collections) -> Self {
        let snippet_service = Arc::new(SnippetServiceImpl::new(
            collections.categories.clone(),
            collections.snippets.clone(),
        ));
        let account_service = Arc::new(AccountServiceImpl::new(
            collections.users.clone(),
            Arc::new(PasswordHasher::new()),
        ));

        Self {
            config: config.clone(),
            collections,
            snippet_service,
            account_service,
        }
    }

    /// Starts background work and bootstraps the admin account.
    pub async fn start(&self) -> SnipResult<()> {
        register_metrics();
        for component in &self.collections.managed {
            component.start()?;
        }

        let bootstrap = &self.config.bootstrap;
        if bootstrap.enabled {
            match self
                .account_service
                .bootstrap_admin(&bootstrap.admin_username, &bootstrap.admin_password)
                .await
            {
                Ok(_) => {}
                Err(e @ SnipError::StoreRead(_)) => {
                    warn!(error = %e, "Admin bootstrap skipped, account presence unknown");
                }
                Err(e) => return Err(e),
            }
        } else {
            warn!("Admin bootstrap disabled");
        }
        Ok(())
    }

    /// Stops background work.
    pub async fn shutdown(&self) {
        for component in &self.collections.managed {
            info!(component = component.name(), "Shutting down");
            component.shutdown().await;
        }
    }

    /// Category and snippet operations.
    #[must_use]
    pub fn snippet_service(&self) -> Arc<dyn SnippetService> {
        self.snippet_service.clone()
    }

    /// Account operations.
    #[must_use]
    pub fn account_service(&self) -> Arc<dyn AccountService> {
        self.account_service.clone()
    }

    /// Components with a start/shutdown lifecycle.
    #[must_use]
    pub fn managed(&self) -> &[Arc<dyn Managed>] {
        &self.collections.managed
    }
}
