//! Configuration loader with layered sources.

use crate::{format_validation_errors, AppConfig, ConfigValidator};
use config::{Config, ConfigError, Environment, File};
use snip_core::SnipError;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Environment variable prefix for overrides (`SNIP__CACHE__LIST_LIMIT=500`).
pub const ENV_PREFIX: &str = "SNIP";

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with `SNIP__` prefix
    pub fn new(config_dir: impl Into<String>) -> Result<Self, SnipError> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, SnipError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    pub async fn reload(&self) -> Result<(), SnipError> {
        let new_config = Self::load_config(&self.config_dir)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    /// Loads configuration from the specified directory.
    fn load_config(config_dir: &str) -> Result<AppConfig, SnipError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("SNIP_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{config_dir}/{name}.toml");
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let app_config: AppConfig = builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error_to_snip_error)?;

        ConfigValidator::validate(&app_config)
            .map_err(|errors| SnipError::Configuration(format_validation_errors(&errors)))?;

        Ok(app_config)
    }

    /// Gets a specific configuration value by key path.
    pub async fn get_value<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let config = self.config.read().await;
        let json = serde_json::to_value(&*config).ok()?;

        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }

        serde_json::from_value(current.clone()).ok()
    }
}

fn config_error_to_snip_error(err: ConfigError) -> SnipError {
    SnipError::Configuration(err.to_string())
}
