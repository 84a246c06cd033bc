//! User entity.

use crate::{Entity, Field};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An account allowed to sign in. The key is the username.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Username, used as the entity key.
    pub key: String,

    /// Argon2 password hash.
    pub password: String,
}

impl User {
    /// Creates a user from a username and an already hashed password.
    #[must_use]
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            key: username.into(),
            password: password_hash.into(),
        }
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("key", &self.key)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Entity for User {
    const COLLECTION: &'static str = "User";

    const FIELDS: &'static [Field<Self>] = &[Field {
        name: "key",
        get: |u: &User| u.key.clone(),
    }];

    fn key(&self) -> &str {
        &self.key
    }

    fn set_key(&mut self, key: String) {
        self.key = key;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password() {
        let user = User::new("admin", "$argon2id$secret");
        let rendered = format!("{user:?}");
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn test_password_is_not_queryable() {
        assert!(User::field("password").is_none());
    }
}
