//! Snippet entity.

use crate::{Entity, Field};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A stored piece of code belonging to one category.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Validate)]
pub struct Snippet {
    /// Unique key; empty until assigned on save.
    #[serde(default)]
    pub key: String,

    /// Key of the owning category.
    #[validate(length(min = 1))]
    pub category: String,

    /// Short title.
    #[validate(length(min = 1, max = 256))]
    pub title: String,

    /// Snippet text.
    #[serde(default)]
    pub body: String,
}

impl Snippet {
    /// Creates a snippet whose key is assigned on save.
    #[must_use]
    pub fn new(
        category: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            key: String::new(),
            category: category.into(),
            title: title.into(),
            body: body.into(),
        }
    }

    /// Sets the key, returning the snippet.
    #[must_use]
    pub fn keyed(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }
}

impl Entity for Snippet {
    const COLLECTION: &'static str = "Snippet";

    const FIELDS: &'static [Field<Self>] = &[
        Field {
            name: "key",
            get: |s: &Snippet| s.key.clone(),
        },
        Field {
            name: "category",
            get: |s: &Snippet| s.category.clone(),
        },
        Field {
            name: "title",
            get: |s: &Snippet| s.title.clone(),
        },
        Field {
            name: "body",
            get: |s: &Snippet| s.body.clone(),
        },
    ];

    fn key(&self) -> &str {
        &self.key
    }

    fn set_key(&mut self, key: String) {
        self.key = key;
    }
}
