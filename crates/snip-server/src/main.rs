//! # MySnip Server
//!
//! Main entry point: loads configuration, builds the collections and
//! services, and runs until Ctrl-C or SIGTERM.

use snip_config::ConfigLoader;
use snip_core::SnipResult;
use snip_server::{init_logging, startup, Application};
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        // The subscriber may not be installed yet.
        eprintln!("Application error: {e}");
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> SnipResult<()> {
    let config_loader = ConfigLoader::from_default_location()?;
    let config = config_loader.get().await;

    init_logging(&config.logging)?;
    startup::print_banner();
    info!("Starting MySnip Server v{}", env!("CARGO_PKG_VERSION"));
    startup::print_startup_info(&config);

    let app = Application::build(&config).await?;
    app.start().await?;
    info!("MySnip Server started");

    shutdown_signal().await;

    app.shutdown().await;
    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
