//! Category entity.

use crate::{Entity, Field};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A named group of snippets.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Validate)]
pub struct Category {
    /// Unique key; empty until assigned on save.
    #[serde(default)]
    pub key: String,

    /// Display name.
    #[validate(length(min = 1, max = 128))]
    pub name: String,
}

impl Category {
    /// Creates a category whose key is assigned on save.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            key: String::new(),
            name: name.into(),
        }
    }

    /// Creates a category with a caller-chosen key.
    #[must_use]
    pub fn with_key(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
        }
    }
}

impl Entity for Category {
    const COLLECTION: &'static str = "Category";

    const FIELDS: &'static [Field<Self>] = &[
        Field {
            name: "key",
            get: |c: &Category| c.key.clone(),
        },
        Field {
            name: "name",
            get: |c: &Category| c.name.clone(),
        },
    ];

    fn key(&self) -> &str {
        &self.key
    }

    fn set_key(&mut self, key: String) {
        self.key = key;
    }
}
