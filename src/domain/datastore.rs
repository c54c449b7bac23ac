//! External data collaborator
//!
//! Endpoints hand statement text and parameters to the store and get
//! loosely-typed JSON rows back; the request pipeline never inspects them.

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::error::DomainError;

/// A row returned by the store.
pub type JsonRow = Map<String, Value>;

/// Parameter bound to a SQL statement. Options carry their column type so
/// NULLs bind with the correct wire type.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(Option<String>),
    Int(Option<i64>),
    Float(Option<f64>),
    Bool(Option<bool>),
    Json(Option<Value>),
}

impl SqlValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(Some(value.into()))
    }

    pub fn int(value: i64) -> Self {
        Self::Int(Some(value))
    }

    pub fn float(value: f64) -> Self {
        Self::Float(Some(value))
    }

    pub fn json(value: Value) -> Self {
        Self::Json(Some(value))
    }
}

/// Relational store the endpoint handlers delegate to.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Datastore: Send + Sync {
    /// Run a statement and return its rows.
    async fn query(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<JsonRow>, DomainError>;

    /// Run a statement and return the number of affected rows.
    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<u64, DomainError>;
}
