//! Filter expression tree and its compiled predicate.

use crate::{Entity, SnipError, SnipResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Boolean expression over `contains` tests on named fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    /// The field's string form contains `value`.
    Contains { field: String, value: String },
    /// Negation.
    Not(Box<Filter>),
    /// Conjunction, operands in construction order.
    And(Box<Filter>, Box<Filter>),
    /// Disjunction, operands in construction order.
    Or(Box<Filter>, Box<Filter>),
}

impl Filter {
    /// Creates a `contains` leaf.
    #[must_use]
    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Contains {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Negates this filter.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Combines `self` (left) and `rhs` (right) with AND.
    #[must_use]
    pub fn and(self, rhs: Filter) -> Self {
        Self::And(Box::new(self), Box::new(rhs))
    }

    /// Combines `self` (left) and `rhs` (right) with OR.
    #[must_use]
    pub fn or(self, rhs: Filter) -> Self {
        Self::Or(Box::new(self), Box::new(rhs))
    }

    /// Field names referenced by this filter, left to right.
    #[must_use]
    pub fn fields(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_fields(&mut out);
        out
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Contains { field, .. } => out.push(field),
            Self::Not(inner) => inner.collect_fields(out),
            Self::And(lhs, rhs) | Self::Or(lhs, rhs) => {
                lhs.collect_fields(out);
                rhs.collect_fields(out);
            }
        }
    }

    /// Resolves every field against `T`'s accessor table.
    ///
    /// # Errors
    ///
    /// Returns [`SnipError::Configuration`] when a field is not queryable on `T`.
    pub fn compile<T: Entity>(&self) -> SnipResult<Predicate<T>> {
        let node = match self {
            Self::Contains { field, value } => {
                let accessor = T::field(field).ok_or_else(|| unknown_field::<T>(field))?;
                Node::Contains {
                    get: accessor.get,
                    value: value.clone(),
                }
            }
            Self::Not(inner) => Node::Not(Box::new(inner.compile::<T>()?.root)),
            Self::And(lhs, rhs) => Node::And(
                Box::new(lhs.compile::<T>()?.root),
                Box::new(rhs.compile::<T>()?.root),
            ),
            Self::Or(lhs, rhs) => Node::Or(
                Box::new(lhs.compile::<T>()?.root),
                Box::new(rhs.compile::<T>()?.root),
            ),
        };
        Ok(Predicate { root: node })
    }

    /// Compiles and evaluates the filter against one entity.
    ///
    /// # Errors
    ///
    /// Returns [`SnipError::Configuration`] when a field is not queryable on `T`.
    pub fn matches<T: Entity>(&self, entity: &T) -> SnipResult<bool> {
        Ok(self.compile::<T>()?.test(entity))
    }
}

pub(crate) fn unknown_field<T: Entity>(field: &str) -> SnipError {
    SnipError::configuration(format!(
        "unknown field '{}' on {} (known: {})",
        field,
        T::COLLECTION,
        T::field_names().join(", ")
    ))
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contains { field, value } => write!(f, "contains(\"{field}\",\"{value}\")"),
            Self::Not(inner) => write!(f, "not({inner})"),
            Self::And(lhs, rhs) => write!(f, "and({lhs},{rhs})"),
            Self::Or(lhs, rhs) => write!(f, "or({lhs},{rhs})"),
        }
    }
}

/// A filter bound to an entity type, ready to evaluate.
pub struct Predicate<T> {
    root: Node<T>,
}

enum Node<T> {
    Contains { get: fn(&T) -> String, value: String },
    Not(Box<Node<T>>),
    And(Box<Node<T>>, Box<Node<T>>),
    Or(Box<Node<T>>, Box<Node<T>>),
}

impl<T> Node<T> {
    fn test(&self, entity: &T) -> bool {
        match self {
            Self::Contains { get, value } => get(entity).contains(value.as_str()),
            Self::Not(inner) => !inner.test(entity),
            Self::And(lhs, rhs) => lhs.test(entity) && rhs.test(entity),
            Self::Or(lhs, rhs) => lhs.test(entity) || rhs.test(entity),
        }
    }
}

impl<T> Predicate<T> {
    /// Evaluates the predicate.
    #[must_use]
    pub fn test(&self, entity: &T) -> bool {
        self.root.test(entity)
    }
}

impl<T> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate").finish_non_exhaustive()
    }
}
