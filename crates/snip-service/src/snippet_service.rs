//! Snippet service trait definition.

use crate::dto::{SaveCategoryRequest, SaveSnippetRequest};
use async_trait::async_trait;
use snip_core::{Category, Interface, SnipResult, Snippet};

/// Category and snippet management.
#[async_trait]
pub trait SnippetService: Interface + Send + Sync {
    /// Lists all categories.
    async fn list_categories(&self) -> SnipResult<Vec<Category>>;

    /// Gets a category by key.
    async fn get_category(&self, key: &str) -> SnipResult<Category>;

    /// Creates or replaces a category.
    async fn save_category(&self, request: SaveCategoryRequest) -> SnipResult<Category>;

    /// Deletes a category. Its snippets are kept.
    async fn delete_category(&self, key: &str) -> SnipResult<()>;

    /// Lists snippets, optionally only those of one category.
    async fn list_snippets(&self, category: Option<&str>) -> SnipResult<Vec<Snippet>>;

    /// Gets a snippet by key.
    async fn get_snippet(&self, key: &str) -> SnipResult<Snippet>;

    /// Creates or replaces a snippet in an existing category.
    async fn save_snippet(&self, request: SaveSnippetRequest) -> SnipResult<Snippet>;

    /// Deletes a snippet.
    async fn delete_snippet(&self, key: &str) -> SnipResult<()>;

    /// Snippets whose title or body contains `text`.
    async fn search_snippets(&self, text: &str) -> SnipResult<Vec<Snippet>>;
}
