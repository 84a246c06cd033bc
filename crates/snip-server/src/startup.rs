//! Server startup utilities.

use snip_config::AppConfig;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(
        r#"
   __  __       ____        _
  |  \/  |_   _/ ___| _ __ (_)_ __
  | |\/| | | | \___ \| '_ \| | '_ \
  | |  | | |_| |___) | | | | | |_) |
  |_|  |_|\__, |____/|_| |_|_| .__/
          |___/              |_|
    "#
    );
}

/// Logs the effective storage settings.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("Environment:   {}", config.app.environment);
    info!("Backend:       {}", config.store.backend);
    if config.store.backend.is_remote() {
        info!("Redis prefix:  {}", config.redis.key_prefix);
        info!("Cache size:    {}", config.cache.max_capacity);
        info!("List limit:    {}", config.cache.list_limit);
    }
    info!("{}", separator);
}
