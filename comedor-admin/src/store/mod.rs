//! Document store port
//!
//! The hosted database is a schemaless document store: collections of JSON
//! objects addressed by string id. Services only talk to it through
//! [`DocumentStore`], so the in-process [`MemoryStore`] and a hosted backend
//! are interchangeable.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use serde_json::{Map, Value};
use shared::error::AppError;
use std::cmp::Ordering;
use thiserror::Error;

/// Store error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(path) => AppError::not_found(path),
            StoreError::Conflict(path) => AppError::already_exists(path),
            StoreError::Serialization(msg) => AppError::internal(msg),
            StoreError::Backend(msg) => AppError::database(msg),
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Comparison operator for [`Filter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Lt,
    Le,
    Gt,
    Ge,
}

/// Field condition for [`DocumentStore::query`]
///
/// Range operators compare numbers with numbers and strings with strings;
/// mixed types and missing fields never match.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    pub fn new(field: impl Into<String>, op: FilterOp, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::Eq, value)
    }

    /// Whether `doc` satisfies this condition
    pub fn matches(&self, doc: &Value) -> bool {
        let Some(actual) = doc.get(&self.field) else {
            return false;
        };
        if self.op == FilterOp::Eq {
            return *actual == self.value;
        }
        let Some(ordering) = compare_values(actual, &self.value) else {
            return false;
        };
        match self.op {
            FilterOp::Eq => ordering == Ordering::Equal,
            FilterOp::Lt => ordering == Ordering::Less,
            FilterOp::Le => ordering != Ordering::Greater,
            FilterOp::Gt => ordering == Ordering::Greater,
            FilterOp::Ge => ordering != Ordering::Less,
        }
    }
}

fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// One write inside [`DocumentStore::batch`]
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    Set {
        collection: String,
        id: String,
        doc: Value,
    },
    Update {
        collection: String,
        id: String,
        fields: Map<String, Value>,
    },
    Delete {
        collection: String,
        id: String,
    },
}

/// Schemaless document store
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Value>>;

    /// Create a document, failing with [`StoreError::Conflict`] if the id is taken
    async fn create(&self, collection: &str, id: &str, doc: Value) -> StoreResult<()>;

    /// Create or replace a document
    async fn set(&self, collection: &str, id: &str, doc: Value) -> StoreResult<()>;

    /// Shallow-merge `fields` into an existing document
    async fn update(&self, collection: &str, id: &str, fields: Map<String, Value>)
    -> StoreResult<()>;

    /// Returns whether a document was removed
    async fn delete(&self, collection: &str, id: &str) -> StoreResult<bool>;

    /// Documents matching every filter, in id order
    async fn query(&self, collection: &str, filters: &[Filter])
    -> StoreResult<Vec<(String, Value)>>;

    /// Apply all writes or none
    async fn batch(&self, ops: Vec<WriteOp>) -> StoreResult<()>;
}
