//! # Snip Core
//!
//! Core types, traits, and error definitions for MySnip Server.
//! Every other crate in the workspace builds on the entity model,
//! the filter expressions, and the error taxonomy defined here.

pub mod domain;
pub mod entity;
pub mod error;
pub mod filter;
pub mod result;
pub mod validation;

pub use domain::*;
pub use entity::*;
pub use error::*;
pub use filter::*;
pub use result::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
