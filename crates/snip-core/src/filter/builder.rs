//! Stack-based query builder.

use super::expr::unknown_field;
use crate::{Entity, Filter, Predicate, SnipError, SnipResult};
use std::fmt;
use std::marker::PhantomData;

/// Builds a [`Filter`] by pushing leaves and reducing the top of a stack.
///
/// Each leaf's field is checked against `T` when it is pushed. Combinators
/// pop their operands in push order, so `contains(a).contains(b).and()`
/// yields `and(a,b)`.
pub struct QueryBuilder<T> {
    stack: Vec<Filter>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> QueryBuilder<T> {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            _entity: PhantomData,
        }
    }

    /// Pushes a `contains(field, value)` leaf.
    ///
    /// # Errors
    ///
    /// Returns [`SnipError::Configuration`] when `field` is not queryable on `T`.
    pub fn contains(mut self, field: &str, value: impl Into<String>) -> SnipResult<Self> {
        if T::field(field).is_none() {
            return Err(unknown_field::<T>(field));
        }
        self.stack.push(Filter::contains(field, value));
        Ok(self)
    }

    /// Negates the most recently pushed expression.
    ///
    /// # Errors
    ///
    /// Returns [`SnipError::Configuration`] when the stack is empty.
    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> SnipResult<Self> {
        let inner = self.pop("not")?;
        self.stack.push(inner.not());
        Ok(self)
    }

    /// Combines the two most recently pushed expressions with AND.
    ///
    /// # Errors
    ///
    /// Returns [`SnipError::Configuration`] when fewer than two expressions are pending.
    pub fn and(self) -> SnipResult<Self> {
        self.reduce("and", Filter::and)
    }

    /// Combines the two most recently pushed expressions with OR.
    ///
    /// # Errors
    ///
    /// Returns [`SnipError::Configuration`] when fewer than two expressions are pending.
    pub fn or(self) -> SnipResult<Self> {
        self.reduce("or", Filter::or)
    }

    /// Number of expressions still on the stack.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.stack.len()
    }

    /// Returns the single, fully reduced filter.
    ///
    /// # Errors
    ///
    /// Returns [`SnipError::Configuration`] unless exactly one expression is pending.
    pub fn build(mut self) -> SnipResult<Filter> {
        if self.stack.len() != 1 {
            return Err(self.unreduced());
        }
        self.pop("build")
    }

    /// Compiles the fully reduced filter into a predicate over `T`.
    ///
    /// # Errors
    ///
    /// Returns [`SnipError::Configuration`] unless exactly one expression is pending.
    pub fn to_predicate(&self) -> SnipResult<Predicate<T>> {
        match self.stack.as_slice() {
            [filter] => filter.compile::<T>(),
            _ => Err(self.unreduced()),
        }
    }

    fn reduce(mut self, op: &str, combine: fn(Filter, Filter) -> Filter) -> SnipResult<Self> {
        if self.stack.len() < 2 {
            return Err(SnipError::configuration(format!(
                "{op}() needs two pending expressions, found {}",
                self.stack.len()
            )));
        }
        let rhs = self.pop(op)?;
        let lhs = self.pop(op)?;
        self.stack.push(combine(lhs, rhs));
        Ok(self)
    }

    fn pop(&mut self, op: &str) -> SnipResult<Filter> {
        self.stack
            .pop()
            .ok_or_else(|| SnipError::configuration(format!("{op}() called on an empty query")))
    }

    fn unreduced(&self) -> SnipError {
        SnipError::configuration(format!(
            "query must reduce to one expression, found {}",
            self.stack.len()
        ))
    }
}

impl<T: Entity> Default for QueryBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Display for QueryBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, filter) in self.stack.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{filter}")?;
        }
        Ok(())
    }
}

impl<T> fmt::Debug for QueryBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("stack", &self.stack)
            .finish()
    }
}
