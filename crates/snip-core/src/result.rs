//! Result type aliases for MySnip.

use crate::SnipError;

/// A specialized `Result` type for snippet server operations.
pub type SnipResult<T> = Result<T, SnipError>;
