//! Entity model shared by every collection.
//!
//! Records are addressed by a string key that is unique within a
//! collection. Fields that filters may query are exposed through a static
//! accessor table, so a filter can address a field by name without any
//! runtime reflection.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Named accessor returning the string form of one entity field.
pub struct Field<T> {
    /// Field name as used in filters.
    pub name: &'static str,
    /// Accessor producing the field's string representation.
    pub get: fn(&T) -> String,
}

impl<T> Field<T> {
    /// Reads the field from an entity.
    #[must_use]
    pub fn read(&self, entity: &T) -> String {
        (self.get)(entity)
    }
}

impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Field<T> {}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field").field("name", &self.name).finish()
    }
}

/// A keyed record stored in exactly one collection.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Name of the collection holding this entity type.
    const COLLECTION: &'static str;

    /// Fields that can be addressed by name in filters.
    const FIELDS: &'static [Field<Self>];

    /// Returns the entity key. An empty key means "assign on save".
    fn key(&self) -> &str;

    /// Replaces the entity key.
    fn set_key(&mut self, key: String);

    /// Looks up a field accessor by name.
    #[must_use]
    fn field(name: &str) -> Option<&'static Field<Self>> {
        Self::FIELDS.iter().find(|field| field.name == name)
    }

    /// Names of all queryable fields, in declaration order.
    #[must_use]
    fn field_names() -> Vec<&'static str> {
        Self::FIELDS.iter().map(|field| field.name).collect()
    }

    /// Returns true if the entity still needs a server-assigned key.
    #[must_use]
    fn needs_key(&self) -> bool {
        self.key().is_empty()
    }
}

/// Generates a fresh server-side key.
#[must_use]
pub fn new_key() -> String {
    Uuid::new_v4().to_string()
}
