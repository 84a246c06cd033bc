//! # Snip Service
//!
//! Application services for MySnip Server: category and snippet
//! management on top of the collection DAOs, and account handling.

pub mod account_service;
pub mod dto;
pub mod r#impl;
pub mod password;
pub mod snippet_service;

pub use account_service::*;
pub use dto::*;
pub use password::*;
pub use r#impl::{AccountServiceImpl, SnippetServiceImpl};
pub use snippet_service::*;
