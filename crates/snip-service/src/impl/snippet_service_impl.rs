//! Snippet service implementation.

use crate::dto::{SaveCategoryRequest, SaveSnippetRequest};
use crate::snippet_service::SnippetService;
use async_trait::async_trait;
use snip_core::{Category, QueryBuilder, SnipError, SnipResult, Snippet, ValidateExt};
use snip_repository::Dao;
use std::sync::Arc;
use tracing::{debug, info};

/// [`SnippetService`] over the category and snippet DAOs.
pub struct SnippetServiceImpl {
    categories: Arc<dyn Dao<Category>>,
    snippets: Arc<dyn Dao<Snippet>>,
}

impl SnippetServiceImpl {
    /// Creates a new snippet service.
    pub fn new(categories: Arc<dyn Dao<Category>>, snippets: Arc<dyn Dao<Snippet>>) -> Self {
        Self {
            categories,
            snippets,
        }
    }
}

#[async_trait]
impl SnippetService for SnippetServiceImpl {
    async fn list_categories(&self) -> SnipResult<Vec<Category>> {
        self.categories.find_all().await
    }

    async fn get_category(&self, key: &str) -> SnipResult<Category> {
        self.categories
            .find_one(key)
            .await?
            .ok_or_else(|| SnipError::not_found("Category", key))
    }

    async fn save_category(&self, request: SaveCategoryRequest) -> SnipResult<Category> {
        request.validate_request()?;

        let saved = self.categories.save(Category::from(request)).await?;
        info!(key = %saved.key, "Category saved");
        Ok(saved)
    }

    async fn delete_category(&self, key: &str) -> SnipResult<()> {
        debug!(key, "Deleting category");
        self.categories.delete(key).await
    }

    async fn list_snippets(&self, category: Option<&str>) -> SnipResult<Vec<Snippet>> {
        let mut snippets = self.snippets.find_all().await?;
        if let Some(category) = category {
            snippets.retain(|snippet| snippet.category == category);
        }
        Ok(snippets)
    }

    async fn get_snippet(&self, key: &str) -> SnipResult<Snippet> {
        self.snippets
            .find_one(key)
            .await?
            .ok_or_else(|| SnipError::not_found("Snippet", key))
    }

    async fn save_snippet(&self, request: SaveSnippetRequest) -> SnipResult<Snippet> {
        request.validate_request()?;

        if self.categories.find_one(&request.category).await?.is_none() {
            return Err(SnipError::not_found("Category", &request.category));
        }

        let saved = self.snippets.save(Snippet::from(request)).await?;
        info!(key = %saved.key, category = %saved.category, "Snippet saved");
        Ok(saved)
    }

    async fn delete_snippet(&self, key: &str) -> SnipResult<()> {
        debug!(key, "Deleting snippet");
        self.snippets.delete(key).await
    }

    async fn search_snippets(&self, text: &str) -> SnipResult<Vec<Snippet>> {
        let filter = QueryBuilder::<Snippet>::new()
            .contains("title", text)?
            .contains("body", text)?
            .or()?
            .build()?;

        // Loads the collection so the filter sees every snippet.
        self.snippets.find_all().await?;
        let found = self.snippets.find(&filter).await?;
        debug!(text, matches = found.len(), "Snippet search");
        Ok(found)
    }
}
