//! In-memory record store for testing and development
//!
//! Mimics the json-server behaviour the proxy relies on: sequential id
//! assignment, `q` full-text search and `field=value` filters.

use crate::core::store::{RecordStore, StoreError, StoreResult};
use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shape of ids the store hands out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    /// `1`, `2`, ...
    Integer,
    /// `"1"`, `"2"`, ...
    Text,
}

#[derive(Debug, Default)]
struct Collection {
    records: Vec<Value>,
    next_id: u64,
}

impl Collection {
    fn position(&self, id: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|record| record_id(record).as_deref() == Some(id))
    }
}

/// In-memory collection
///
/// Cloning shares the same underlying records.
#[derive(Debug, Clone)]
pub struct InMemoryRecordStore {
    kind: IdKind,
    inner: Arc<RwLock<Collection>>,
}

impl InMemoryRecordStore {
    pub fn new(kind: IdKind) -> Self {
        Self::with_records(kind, Vec::new())
    }

    pub fn integer_ids() -> Self {
        Self::new(IdKind::Integer)
    }

    pub fn text_ids() -> Self {
        Self::new(IdKind::Text)
    }

    /// Start with existing records; new ids continue after the highest numeric one
    pub fn with_records(kind: IdKind, records: Vec<Value>) -> Self {
        let next_id = records
            .iter()
            .filter_map(|r| record_id(r)?.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            kind,
            inner: Arc::new(RwLock::new(Collection { records, next_id })),
        }
    }

    pub fn id_kind(&self) -> IdKind {
        self.kind
    }

    /// Copy of every stored record, in insertion order
    pub async fn snapshot(&self) -> Vec<Value> {
        self.inner.read().await.records.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn id_value(&self, id: u64) -> Value {
        match self.kind {
            IdKind::Integer => json!(id),
            IdKind::Text => json!(id.to_string()),
        }
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::integer_ids()
    }
}

fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// The record's id as text, whatever its JSON type
fn record_id(record: &Value) -> Option<String> {
    record.get("id").and_then(id_text)
}

fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn matches(record: &Value, query: &[(String, String)]) -> bool {
    query.iter().all(|(key, expected)| match key.as_str() {
        "q" => {
            let needle = expected.to_lowercase();
            record
                .as_object()
                .is_some_and(|fields| {
                    fields
                        .values()
                        .filter_map(Value::as_str)
                        .any(|text| text.to_lowercase().contains(&needle))
                })
        }
        // Paging and sorting parameters are not filters
        k if k.starts_with('_') => true,
        k => record
            .get(k)
            .and_then(field_text)
            .is_some_and(|actual| &actual == expected),
    })
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn list(&self, query: &[(String, String)]) -> StoreResult<Value> {
        let collection = self.inner.read().await;
        let records = collection
            .records
            .iter()
            .filter(|record| matches(record, query))
            .cloned()
            .collect();
        Ok(Value::Array(records))
    }

    async fn get(&self, id: &str) -> StoreResult<Value> {
        let collection = self.inner.read().await;
        collection
            .position(id)
            .map(|index| collection.records[index].clone())
            .ok_or(StoreError::NotFound)
    }

    async fn create(&self, record: Value) -> StoreResult<Value> {
        let Value::Object(mut fields) = record else {
            return Err(StoreError::Status(StatusCode::BAD_REQUEST));
        };
        let mut collection = self.inner.write().await;

        match fields.get("id").and_then(id_text) {
            Some(id) => {
                if collection.position(&id).is_some() {
                    return Err(StoreError::Status(StatusCode::CONFLICT));
                }
                if let Ok(n) = id.parse::<u64>() {
                    collection.next_id = collection.next_id.max(n + 1);
                }
            }
            None => {
                let id = self.id_value(collection.next_id);
                collection.next_id += 1;
                fields.insert("id".to_string(), id);
            }
        }

        let record = Value::Object(fields);
        collection.records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: &str, record: Value) -> StoreResult<Value> {
        let Value::Object(mut fields) = record else {
            return Err(StoreError::Status(StatusCode::BAD_REQUEST));
        };
        let mut collection = self.inner.write().await;
        let index = collection.position(id).ok_or(StoreError::NotFound)?;

        let stored_id = collection.records[index]
            .get("id")
            .cloned()
            .unwrap_or(Value::Null);
        fields.insert("id".to_string(), stored_id);

        let record = Value::Object(fields);
        collection.records[index] = record.clone();
        Ok(record)
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let mut collection = self.inner.write().await;
        let index = collection.position(id).ok_or(StoreError::NotFound)?;
        collection.records.remove(index);
        Ok(())
    }
}
