//! # Snip Server
//!
//! Process wiring for MySnip Server: selects the storage backend, builds
//! the collection DAOs and services, and runs their lifecycle.

pub mod app;
pub mod logging;
pub mod startup;

pub use app::Application;
pub use logging::init_logging;
