//! Typed error handling for the menu proxy
//!
//! Every failure a route can produce is one variant of [`ProxyError`]. Each
//! variant knows its HTTP status, a machine-readable code for logs, and the
//! JSON body it renders to:
//!
//! ```json
//! { "error": "Validation failed", "message": "...", "details": { "price": "..." } }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! match result {
//!     Err(ProxyError::Validation(errors)) => println!("{} invalid fields", errors.len()),
//!     Err(ProxyError::NotFound { id, .. }) => println!("{} is gone", id),
//!     Err(e) => eprintln!("Other error: {}", e),
//!     Ok(item) => println!("{:?}", item),
//! }
//! ```

use crate::core::store::StoreError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Result alias used by every route handler
pub type ProxyResult<T> = Result<T, ProxyError>;

// =============================================================================
// Field errors
// =============================================================================

/// Field path -> human readable message
///
/// At most one message is kept per field: the first failing rule wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map holding exactly one failure
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(field, message);
        errors
    }

    /// Record a failure unless the field already has one
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

// =============================================================================
// Identifier errors
// =============================================================================

/// Problems with the id carried in the path or body
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// The path segment cannot be an id of this entity
    #[error("invalid id '{value}': {reason}")]
    Invalid { value: String, reason: String },

    /// Path and body name different records
    #[error("body id '{body}' does not match path id '{path}'")]
    Mismatch { body: String, path: String },
}

// =============================================================================
// Store operations
// =============================================================================

/// Which record store call failed, used to pick the public error text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    List,
    Fetch,
    Create,
    CheckExists,
    Update,
    Delete,
}

impl StoreOperation {
    /// Fixed text sent to the client; the underlying cause is only logged
    pub fn failure_message(&self) -> &'static str {
        match self {
            StoreOperation::List => "Failed to fetch from json-server",
            StoreOperation::Fetch => "Failed to fetch item",
            StoreOperation::Create => "Failed to create item",
            StoreOperation::CheckExists => "Failed to check item existence",
            StoreOperation::Update => "Failed to update item",
            StoreOperation::Delete => "Failed to delete item",
        }
    }

    /// Whether a store error status is passed back to the client as is
    ///
    /// Only list and create answer with the store's status; every other
    /// operation reports a failed store call as a plain 500.
    pub fn carries_store_status(&self) -> bool {
        matches!(self, StoreOperation::List | StoreOperation::Create)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreOperation::List => "list",
            StoreOperation::Fetch => "fetch",
            StoreOperation::Create => "create",
            StoreOperation::CheckExists => "check_exists",
            StoreOperation::Update => "update",
            StoreOperation::Delete => "delete",
        }
    }
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// ProxyError
// =============================================================================

/// The closed set of failures a proxy route can report
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Request body is not JSON
    #[error("malformed request body: {message}")]
    MalformedBody { message: String },

    /// One or more fields failed their constraints
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    #[error(transparent)]
    Identifier(#[from] IdentifierError),

    /// The record does not exist
    #[error("{entity} with id '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    /// The record store failed or answered with an error status
    #[error("record store {operation} failed: {source}")]
    Store {
        operation: StoreOperation,
        #[source]
        source: StoreError,
    },

    /// The record store returned something that is not a valid record
    #[error("record store returned an invalid {entity}: {errors}")]
    ResponseShape {
        entity: &'static str,
        errors: FieldErrors,
    },

    /// Should not happen in normal operation
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON body of every error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ProxyError {
    /// Wrap a store failure, turning a store "not found" into [`ProxyError::NotFound`]
    pub fn from_store(
        operation: StoreOperation,
        entity: &'static str,
        id: impl fmt::Display,
        source: StoreError,
    ) -> Self {
        match source {
            StoreError::NotFound => ProxyError::NotFound {
                entity,
                id: id.to_string(),
            },
            source => ProxyError::Store { operation, source },
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::MalformedBody { .. } => StatusCode::BAD_REQUEST,
            ProxyError::Validation(_) => StatusCode::BAD_REQUEST,
            ProxyError::Identifier(_) => StatusCode::BAD_REQUEST,
            ProxyError::NotFound { .. } => StatusCode::NOT_FOUND,
            ProxyError::Store { operation, source } => match source {
                StoreError::NotFound => StatusCode::NOT_FOUND,
                StoreError::Status(status)
                    if operation.carries_store_status() && status.as_u16() >= 400 =>
                {
                    *status
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ProxyError::ResponseShape { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ProxyError::MalformedBody { .. } => "MALFORMED_BODY",
            ProxyError::Validation(_) => "VALIDATION_FAILED",
            ProxyError::Identifier(IdentifierError::Invalid { .. }) => "INVALID_ID",
            ProxyError::Identifier(IdentifierError::Mismatch { .. }) => "ID_MISMATCH",
            ProxyError::NotFound { .. } => "NOT_FOUND",
            ProxyError::Store { source, .. } => source.error_code(),
            ProxyError::ResponseShape { .. } => "INVALID_STORE_RESPONSE",
            ProxyError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Public body for this error; store causes never leave the process
    pub fn to_response(&self) -> ErrorResponse {
        match self {
            ProxyError::MalformedBody { message } => ErrorResponse {
                error: "Invalid JSON format".to_string(),
                message: Some(message.clone()),
                details: None,
            },
            ProxyError::Validation(errors) => ErrorResponse {
                error: "Validation failed".to_string(),
                message: Some(
                    "Invalid input data, see details for per-field validation errors".to_string(),
                ),
                details: serde_json::to_value(errors).ok(),
            },
            ProxyError::Identifier(IdentifierError::Invalid { reason, .. }) => ErrorResponse {
                error: "Invalid ID".to_string(),
                message: Some(reason.clone()),
                details: None,
            },
            ProxyError::Identifier(IdentifierError::Mismatch { body, path }) => ErrorResponse {
                error: "ID mismatch".to_string(),
                message: Some(format!(
                    "Body id '{}' does not match path id '{}'",
                    body, path
                )),
                details: None,
            },
            ProxyError::NotFound { entity, id } => ErrorResponse {
                error: "Not found".to_string(),
                message: Some(format!("{} with ID {} not found", entity, id)),
                details: None,
            },
            ProxyError::Store { operation, .. } => ErrorResponse {
                error: operation.failure_message().to_string(),
                message: None,
                details: None,
            },
            ProxyError::ResponseShape { entity, .. } => ErrorResponse {
                error: "Invalid item data".to_string(),
                message: Some(format!("Record store returned an invalid {}", entity)),
                details: None,
            },
            ProxyError::Internal(_) => ErrorResponse {
                error: "Internal server error".to_string(),
                message: None,
                details: None,
            },
        }
    }
}

impl From<FieldErrors> for ProxyError {
    fn from(errors: FieldErrors) -> Self {
        ProxyError::Validation(errors)
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            ProxyError::Store { .. }
            | ProxyError::ResponseShape { .. }
            | ProxyError::Internal(_) => {
                tracing::error!(code = self.error_code(), status = %status, "{}", self);
            }
            ProxyError::NotFound { .. } => {
                tracing::debug!(code = self.error_code(), "{}", self);
            }
            _ => {
                tracing::debug!(code = self.error_code(), "rejected request: {}", self);
            }
        }
        (status, Json(self.to_response())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validation_error() -> ProxyError {
        let mut errors = FieldErrors::new();
        errors.insert("name", "Name is required");
        errors.insert("price", "Price must be greater than 0");
        ProxyError::Validation(errors)
    }

    #[test]
    fn test_field_errors_keep_first_message() {
        let mut errors = FieldErrors::new();
        errors.insert("price", "Price is required");
        errors.insert("price", "Price must be greater than 0");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("price"), Some("Price is required"));
    }

    #[test]
    fn test_field_errors_serialize_as_flat_map() {
        let errors = FieldErrors::single("name", "Name is required");
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({ "name": "Name is required" })
        );
    }

    #[test]
    fn test_validation_response_lists_every_field() {
        let err = validation_error();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let body = err.to_response();
        assert_eq!(body.error, "Validation failed");
        assert!(body.message.unwrap().to_lowercase().contains("validation"));
        let details = body.details.unwrap();
        assert_eq!(details["name"], "Name is required");
        assert_eq!(details["price"], "Price must be greater than 0");
    }

    #[test]
    fn test_store_status_is_carried_through() {
        let err = ProxyError::Store {
            operation: StoreOperation::Create,
            source: StoreError::Status(StatusCode::SERVICE_UNAVAILABLE),
        };
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        let body = serde_json::to_value(err.to_response()).unwrap();
        assert_eq!(body, json!({ "error": "Failed to create item" }));
    }

    #[test]
    fn test_store_status_is_not_carried_on_fetch_update_delete() {
        for operation in [
            StoreOperation::Fetch,
            StoreOperation::CheckExists,
            StoreOperation::Update,
            StoreOperation::Delete,
        ] {
            let err = ProxyError::Store {
                operation,
                source: StoreError::Status(StatusCode::UNAUTHORIZED),
            };
            assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        }

        let err = ProxyError::Store {
            operation: StoreOperation::List,
            source: StoreError::Status(StatusCode::UNAUTHORIZED),
        };
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_store_transport_failure_is_500() {
        let err = ProxyError::Store {
            operation: StoreOperation::List,
            source: StoreError::Transport("connection refused".to_string()),
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = err.to_response();
        assert_eq!(body.error, "Failed to fetch from json-server");
        assert!(body.message.is_none());
    }

    #[test]
    fn test_store_not_found_becomes_not_found() {
        let err = ProxyError::from_store(StoreOperation::Delete, "Menu item", 7, StoreError::NotFound);
        assert!(matches!(err, ProxyError::NotFound { ref id, .. } if id == "7"));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            err.to_response().message.as_deref(),
            Some("Menu item with ID 7 not found")
        );
    }

    #[test]
    fn test_identifier_errors() {
        let invalid: ProxyError = IdentifierError::Invalid {
            value: "abc".to_string(),
            reason: "Item ID must be a positive integer".to_string(),
        }
        .into();
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(invalid.error_code(), "INVALID_ID");
        assert_eq!(invalid.to_response().error, "Invalid ID");

        let mismatch: ProxyError = IdentifierError::Mismatch {
            body: "2".to_string(),
            path: "1".to_string(),
        }
        .into();
        assert_eq!(mismatch.error_code(), "ID_MISMATCH");
        assert_eq!(mismatch.to_response().error, "ID mismatch");
    }

    #[test]
    fn test_response_shape_hides_field_errors() {
        let err = ProxyError::ResponseShape {
            entity: "Food item",
            errors: FieldErrors::single("category", "bad"),
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_response().details.is_none());
    }
}
