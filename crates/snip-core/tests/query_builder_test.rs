//! Behaviour of the stack-based query builder against a small test entity.

use serde::{Deserialize, Serialize};
use snip_core::{Entity, Field, QueryBuilder, SnipError};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Bean {
    key: String,
    value: String,
    second: String,
}

impl Bean {
    fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
            second: String::new(),
        }
    }

    fn with_second(mut self, second: &str) -> Self {
        self.second = second.to_string();
        self
    }
}

impl Entity for Bean {
    const COLLECTION: &'static str = "Bean";

    const FIELDS: &'static [Field<Self>] = &[
        Field {
            name: "key",
            get: |b: &Bean| b.key.clone(),
        },
        Field {
            name: "value",
            get: |b: &Bean| b.value.clone(),
        },
        Field {
            name: "second",
            get: |b: &Bean| b.second.clone(),
        },
    ];

    fn key(&self) -> &str {
        &self.key
    }

    fn set_key(&mut self, key: String) {
        self.key = key;
    }
}

fn query() -> QueryBuilder<Bean> {
    QueryBuilder::new()
}

// =============================================================================
// Predicate semantics
// =============================================================================

#[test]
fn test_contains_predicate() {
    let predicate = query().contains("value", "42").unwrap().to_predicate().unwrap();
    assert!(predicate.test(&Bean::new("key", "42")));
    assert!(!predicate.test(&Bean::new("key", "NaN")));
}

#[test]
fn test_not_predicate() {
    let predicate = query()
        .contains("key", "10")
        .and_then(QueryBuilder::not)
        .unwrap()
        .to_predicate()
        .unwrap();
    assert!(!predicate.test(&Bean::new("10", "42")));
    assert!(predicate.test(&Bean::new("key", "NaN")));
}

#[test]
fn test_or_predicate() {
    let predicate = query()
        .contains("value", "42")
        .and_then(|q| q.contains("value", "43"))
        .and_then(QueryBuilder::or)
        .unwrap()
        .to_predicate()
        .unwrap();
    assert!(predicate.test(&Bean::new("key", "42")));
    assert!(!predicate.test(&Bean::new("key", "22")));
}

#[test]
fn test_and_predicate_true() {
    let predicate = query()
        .contains("value", "42")
        .and_then(|q| q.contains("value", "42"))
        .and_then(QueryBuilder::and)
        .unwrap()
        .to_predicate()
        .unwrap();
    assert!(predicate.test(&Bean::new("key", "42")));
}

#[test]
fn test_and_predicate_false() {
    let predicate = query()
        .contains("value", "42")
        .and_then(|q| q.contains("value", "44"))
        .and_then(QueryBuilder::and)
        .unwrap()
        .to_predicate()
        .unwrap();
    assert!(!predicate.test(&Bean::new("key", "42")));
}

#[test]
fn test_complex_predicate_true() {
    let predicate = query()
        .contains("value", "foo")
        .and_then(|q| q.contains("second", "foo"))
        .and_then(QueryBuilder::or)
        .and_then(|q| q.contains("key", "1"))
        .and_then(QueryBuilder::and)
        .unwrap()
        .to_predicate()
        .unwrap();
    assert!(predicate.test(&Bean::new("1", "test").with_second("foo")));
}

#[test]
fn test_complex_predicate_false() {
    let predicate = query()
        .contains("value", "foo")
        .and_then(|q| q.contains("second", "foo"))
        .and_then(QueryBuilder::or)
        .and_then(|q| q.contains("key", "2"))
        .and_then(QueryBuilder::and)
        .unwrap()
        .to_predicate()
        .unwrap();
    assert!(!predicate.test(&Bean::new("1", "test").with_second("foo")));
}

// =============================================================================
// Canonical rendering
// =============================================================================

#[test]
fn test_render_contains() {
    let q = query().contains("key", "42").unwrap();
    assert_eq!(q.to_string(), r#"contains("key","42")"#);
}

#[test]
fn test_render_not() {
    let q = query().contains("key", "1").and_then(QueryBuilder::not).unwrap();
    assert_eq!(q.to_string(), r#"not(contains("key","1"))"#);
}

#[test]
fn test_render_and() {
    let q = query()
        .contains("key", "1")
        .and_then(|q| q.contains("key", "2"))
        .and_then(QueryBuilder::and)
        .unwrap();
    assert_eq!(q.to_string(), r#"and(contains("key","1"),contains("key","2"))"#);
}

#[test]
fn test_render_or() {
    let q = query()
        .contains("key", "1")
        .and_then(|q| q.contains("key", "2"))
        .and_then(QueryBuilder::or)
        .unwrap();
    assert_eq!(q.to_string(), r#"or(contains("key","1"),contains("key","2"))"#);
}

#[test]
fn test_build_matches_rendering() {
    let filter = query()
        .contains("key", "1")
        .and_then(|q| q.contains("value", "2"))
        .and_then(QueryBuilder::or)
        .and_then(QueryBuilder::build)
        .unwrap();
    assert_eq!(filter.to_string(), r#"or(contains("key","1"),contains("value","2"))"#);
}

// =============================================================================
// Usage errors
// =============================================================================

#[test]
fn test_unknown_field_fails_immediately() {
    let err = query().contains("missing", "x").unwrap_err();
    assert!(matches!(err, SnipError::Configuration(_)));
}

#[test]
fn test_not_on_empty_stack() {
    let err = query().not().unwrap_err();
    assert!(matches!(err, SnipError::Configuration(_)));
}

#[test]
fn test_and_with_one_operand() {
    let err = query()
        .contains("key", "1")
        .and_then(QueryBuilder::and)
        .unwrap_err();
    assert!(matches!(err, SnipError::Configuration(_)));
}

#[test]
fn test_unreduced_query_cannot_compile() {
    let q = query()
        .contains("key", "1")
        .and_then(|q| q.contains("key", "2"))
        .unwrap();
    assert_eq!(q.pending(), 2);
    assert!(matches!(q.to_predicate(), Err(SnipError::Configuration(_))));
    assert!(matches!(q.build(), Err(SnipError::Configuration(_))));
}
