//! Account service trait definition.

use crate::dto::{AccountResponse, LoginRequest};
use async_trait::async_trait;
use snip_core::{Interface, SnipResult};

/// Account bootstrap and credential checks.
#[async_trait]
pub trait AccountService: Interface + Send + Sync {
    /// Creates the account if no account with that username exists.
    ///
    /// Returns `true` when the account was created.
    async fn bootstrap_admin(&self, username: &str, password: &str) -> SnipResult<bool>;

    /// Checks a username and password.
    ///
    /// Unknown users and wrong passwords both yield
    /// [`SnipError::InvalidCredentials`](snip_core::SnipError::InvalidCredentials).
    async fn verify_credentials(&self, request: LoginRequest) -> SnipResult<AccountResponse>;
}
