//! Tracing subscriber setup.

use snip_config::LoggingConfig;
use snip_core::{SnipError, SnipResult};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured filter.
pub fn init_logging(config: &LoggingConfig) -> SnipResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .map_err(|e| SnipError::configuration(format!("Invalid log filter: {e}")))?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
    };

    result.map_err(|e| SnipError::configuration(format!("Logging already initialised: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_reported() {
        let config = LoggingConfig::default();
        let _ = init_logging(&config);
        assert!(init_logging(&config).is_err());
    }
}
