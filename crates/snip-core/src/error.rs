//! Unified error types for all layers of the snippet server.

use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for MySnip.
///
/// Read-path store failures (`StoreRead`) are normally absorbed by the
/// caching DAO and only logged; write-path failures (`StoreWrite`) always
/// reach the caller.
#[derive(Error, Debug)]
pub enum SnipError {
    // ============ Domain Errors ============
    /// Resource not found
    #[error("Resource not found: {resource_type} with key {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    // ============ Authentication Errors ============
    /// Unauthorized access
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Invalid credentials
    #[error("Invalid credentials")]
    InvalidCredentials,

    // ============ Infrastructure Errors ============
    /// Configuration or programming error (unknown filter field, bad builder usage)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Remote store read failed
    #[error("Store read error: {0}")]
    StoreRead(String),

    /// Remote store write or delete failed
    #[error("Store write error: {0}")]
    StoreWrite(String),

    /// Timeout error
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SnipError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::StoreRead(_) => "STORE_READ_ERROR",
            Self::StoreWrite(_) => "STORE_WRITE_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration<T: Into<String>>(message: T) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates a store read error.
    #[must_use]
    pub fn store_read<T: Into<String>>(message: T) -> Self {
        Self::StoreRead(message.into())
    }

    /// Creates a store write error.
    #[must_use]
    pub fn store_write<T: Into<String>>(message: T) -> Self {
        Self::StoreWrite(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks if this error is retriable.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(
            self,
            Self::StoreRead(_) | Self::StoreWrite(_) | Self::Timeout(_)
        )
    }
}

impl From<serde_json::Error> for SnipError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
