//! Configuration validation.
//!
//! All problems are collected so a bad configuration is reported in one go
//! at start-up.

use crate::AppConfig;
use std::fmt;
use url::Url;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// A size or count must be at least one.
    ZeroValue { name: String },
    /// Timeout or interval must be positive.
    NonPositiveTimeout { name: String },
    /// URL format is invalid.
    InvalidUrl { url_type: String, message: String },
    /// Bootstrap account is enabled but incomplete.
    IncompleteBootstrap,
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroValue { name } => write!(f, "'{name}' must be at least 1"),
            Self::NonPositiveTimeout { name } => write!(f, "Timeout '{name}' must be positive"),
            Self::InvalidUrl { url_type, message } => {
                write!(f, "Invalid {url_type} URL: {message}")
            }
            Self::IncompleteBootstrap => {
                write!(f, "Bootstrap admin username and password must not be empty")
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        Self::validate_cache(config, &mut errors);
        if config.store.backend.is_remote() {
            Self::validate_redis(config, &mut errors);
        }
        if config.bootstrap.enabled
            && (config.bootstrap.admin_username.trim().is_empty()
                || config.bootstrap.admin_password.is_empty())
        {
            errors.push(ConfigValidationError::IncompleteBootstrap);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_cache(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let cache = &config.cache;
        if cache.max_capacity == 0 {
            errors.push(zero("cache.max_capacity"));
        }
        if cache.list_limit == 0 {
            errors.push(zero("cache.list_limit"));
        }
        for (name, value) in [
            ("cache.idle_expiry_secs", cache.idle_expiry_secs),
            ("cache.prime_timeout_ms", cache.prime_timeout_ms),
            ("cache.stats_interval_secs", cache.stats_interval_secs),
        ] {
            if value == 0 {
                errors.push(ConfigValidationError::NonPositiveTimeout {
                    name: name.to_string(),
                });
            }
        }
    }

    fn validate_redis(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        match Url::parse(&config.redis.url) {
            Ok(url) if matches!(url.scheme(), "redis" | "rediss") => {}
            Ok(url) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: "redis".to_string(),
                message: format!("unsupported scheme '{}'", url.scheme()),
            }),
            Err(e) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: "redis".to_string(),
                message: e.to_string(),
            }),
        }
        if config.redis.pool_size == 0 {
            errors.push(zero("redis.pool_size"));
        }
    }
}

fn zero(name: &str) -> ConfigValidationError {
    ConfigValidationError::ZeroValue {
        name: name.to_string(),
    }
}

/// Formats validation errors for display.
#[must_use]
pub fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    let mut output = String::from("Configuration validation failed:");
    for (i, error) in errors.iter().enumerate() {
        output.push_str(&format!("\n  {}. {}", i + 1, error));
    }
    output
}
