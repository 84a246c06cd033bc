//! Request DTOs accepted by the services.

use serde::{Deserialize, Serialize};
use snip_core::{Category, Snippet};
use validator::Validate;

/// Request to create or replace a category.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SaveCategoryRequest {
    /// Existing key to replace; a new key is assigned when absent.
    pub key: Option<String>,

    #[validate(length(min = 1, max = 128, message = "Name must be 1-128 characters"))]
    pub name: String,
}

impl From<SaveCategoryRequest> for Category {
    fn from(request: SaveCategoryRequest) -> Self {
        Category::with_key(request.key.unwrap_or_default(), request.name)
    }
}

/// Request to create or replace a snippet.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SaveSnippetRequest {
    pub key: Option<String>,

    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,

    #[validate(length(min = 1, max = 256, message = "Title must be 1-256 characters"))]
    pub title: String,

    #[serde(default)]
    pub body: String,
}

impl From<SaveSnippetRequest> for Snippet {
    fn from(request: SaveSnippetRequest) -> Self {
        Snippet::new(request.category, request.title, request.body)
            .keyed(request.key.unwrap_or_default())
    }
}

/// Sign-in credentials.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Public view of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountResponse {
    pub username: String,
}

impl From<snip_core::User> for AccountResponse {
    fn from(user: snip_core::User) -> Self {
        Self { username: user.key }
    }
}
