//! Account service implementation.

use crate::account_service::AccountService;
use crate::dto::{AccountResponse, LoginRequest};
use crate::password::PasswordHasher;
use async_trait::async_trait;
use snip_core::{SnipError, SnipResult, User, ValidateExt};
use snip_repository::Dao;
use std::sync::Arc;
use tracing::{debug, warn};

/// [`AccountService`] over the user DAO.
pub struct AccountServiceImpl {
    users: Arc<dyn Dao<User>>,
    password_hasher: Arc<PasswordHasher>,
}

impl AccountServiceImpl {
    /// Creates a new account service.
    pub fn new(users: Arc<dyn Dao<User>>, password_hasher: Arc<PasswordHasher>) -> Self {
        Self {
            users,
            password_hasher,
        }
    }
}

#[async_trait]
impl AccountService for AccountServiceImpl {
    async fn bootstrap_admin(&self, username: &str, password: &str) -> SnipResult<bool> {
        if username.is_empty() || password.is_empty() {
            return Err(SnipError::validation(
                "Bootstrap username and password must not be empty",
            ));
        }
        // A failed presence check must not read as absent.
        if self.users.exists(username).await? {
            debug!(username, "Admin account already present");
            return Ok(false);
        }

        warn!(username, "Bootstrapping admin account");
        let hash = self.password_hasher.hash(password)?;
        self.users.save(User::new(username, hash)).await?;
        Ok(true)
    }

    async fn verify_credentials(&self, request: LoginRequest) -> SnipResult<AccountResponse> {
        request.validate_request()?;

        let Some(user) = self.users.find_one(&request.username).await? else {
            debug!(username = %request.username, "Unknown user");
            return Err(SnipError::InvalidCredentials);
        };

        if !self.password_hasher.verify(&request.password, &user.password)? {
            return Err(SnipError::InvalidCredentials);
        }

        Ok(AccountResponse::from(user))
    }
}
