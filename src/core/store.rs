//! Record store abstraction
//!
//! The proxy never owns data. It forwards to a json-server style REST
//! resource through this trait, which deals in raw JSON so that responses
//! can be re-validated before anything reaches a client.

use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::Value;
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failures reported by a record store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store answered 404 for the requested record
    #[error("record not found")]
    NotFound,

    /// The store answered with another unsuccessful status
    #[error("record store responded with status {0}")]
    Status(StatusCode),

    /// The store could not be reached
    #[error("record store unreachable: {0}")]
    Transport(String),

    /// The store answered with a body that is not JSON
    #[error("record store returned an unreadable body: {0}")]
    Decode(String),
}

impl StoreError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::NotFound => "STORE_NOT_FOUND",
            StoreError::Status(_) => "STORE_STATUS",
            StoreError::Transport(_) => "STORE_UNREACHABLE",
            StoreError::Decode(_) => "STORE_DECODE",
        }
    }
}

/// CRUD calls against one store collection
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// List the collection, passing query pairs through untouched
    async fn list(&self, query: &[(String, String)]) -> StoreResult<Value>;

    /// Fetch one record
    async fn get(&self, id: &str) -> StoreResult<Value>;

    /// Create a record; the store assigns the id
    async fn create(&self, record: Value) -> StoreResult<Value>;

    /// Replace a record in place
    async fn update(&self, id: &str, record: Value) -> StoreResult<Value>;

    async fn delete(&self, id: &str) -> StoreResult<()>;
}
