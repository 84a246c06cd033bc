//! Filter expressions over entity fields.
//!
//! A [`Filter`] is a small boolean tree of `contains` tests. It renders to a
//! canonical string such as `and(contains("key","1"),contains("key","2"))`,
//! serializes to a JSON document for stores that accept native queries, and
//! compiles against an entity's field table into a [`Predicate`].
//!
//! [`QueryBuilder`] offers the stack-style API: push leaves, then reduce the
//! top of the stack with `not`, `and` and `or`.

mod builder;
mod expr;

pub use builder::QueryBuilder;
pub use expr::{Filter, Predicate};
