//! Persistence backend selection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where entity collections are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local maps, lost on restart.
    #[default]
    Memory,
    /// Remote Redis hashes behind a local read/write-through cache.
    Redis,
}

impl StoreBackend {
    /// Returns true if collections live in a remote store.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Redis)
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::Redis => write!(f, "redis"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_display() {
        assert_eq!(StoreBackend::Memory.to_string(), "memory");
        assert_eq!(StoreBackend::Redis.to_string(), "redis");
    }

    #[test]
    fn test_backend_deserializes_lowercase() {
        let backend: StoreBackend = serde_json::from_str("\"redis\"").unwrap();
        assert_eq!(backend, StoreBackend::Redis);
        assert!(backend.is_remote());
        assert!(!StoreBackend::default().is_remote());
    }
}
