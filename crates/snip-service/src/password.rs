//! Password hashing using Argon2.

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};
use snip_core::{SnipError, SnipResult};
use std::sync::Arc;
use tracing::debug;

/// Argon2id password hasher.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Arc<Argon2<'static>>,
}

impl PasswordHasher {
    /// Creates a hasher with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::with_params(Params::DEFAULT)
    }

    /// Creates a hasher with custom parameters.
    #[must_use]
    pub fn with_params(params: Params) -> Self {
        Self {
            argon2: Arc::new(Argon2::new(Algorithm::Argon2id, Version::V0x13, params)),
        }
    }

    /// Hashes a password into a PHC string.
    pub fn hash(&self, password: &str) -> SnipResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| SnipError::Internal(format!("Failed to hash password: {e}")))?;

        debug!("Password hashed successfully");
        Ok(hash.to_string())
    }

    /// Verifies a password against a PHC string.
    pub fn verify(&self, password: &str, hash: &str) -> SnipResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| SnipError::Internal(format!("Invalid password hash format: {e}")))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => {
                debug!("Password verification failed: incorrect password");
                Ok(false)
            }
            Err(e) => Err(SnipError::Internal(format!(
                "Password verification error: {e}"
            ))),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("s3cret").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("s3cret", &hash).unwrap());
        assert!(!hasher.verify("wrong", &hash).unwrap());
    }

    #[test]
    fn test_same_password_different_salt() {
        let hasher = PasswordHasher::new();
        assert_ne!(hasher.hash("pw").unwrap(), hasher.hash("pw").unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let hasher = PasswordHasher::new();
        assert!(hasher.verify("pw", "plaintext").is_err());
    }
}
