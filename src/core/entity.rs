//! Entity trait tying a domain record to its form shape and constraint table

use crate::core::error::FieldErrors;
use crate::core::validation::EntityValidationConfig;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;

/// Which constraint table to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Identifier absent; the store assigns it
    Create,
    /// Identifier required
    Update,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Update => "update",
        }
    }
}

/// A menu record the proxy knows how to validate and forward.
///
/// An implementation provides:
/// - the two shapes of the record: the typed domain record (`Self`) and the
///   form shape (`Form`), which is what a client edits and submits
/// - the constraint table for each [`Operation`]
/// - the pure transforms between the two shapes
///
/// Validation, id agreement and response re-checks are provided on top.
pub trait MenuEntity:
    Clone + Serialize + DeserializeOwned + PartialEq + fmt::Debug + Send + Sync + 'static
{
    /// Identifier assigned by the record store
    type Id: Clone + fmt::Display + PartialEq + Serialize + DeserializeOwned + Send + Sync;

    /// Form representation (strings and partial data, id optional)
    type Form: Clone + Serialize + DeserializeOwned + PartialEq + fmt::Debug + Send + Sync;

    /// Human name used in messages ("Menu item")
    fn display_name() -> &'static str;

    /// Default collection name at the record store
    fn store_resource() -> &'static str;

    fn validation_config(operation: Operation) -> EntityValidationConfig;

    /// Parse a path segment into an id, `None` if no record could have it
    fn parse_id(raw: &str) -> Option<Self::Id>;

    fn invalid_id_message() -> &'static str {
        "Item ID is invalid"
    }

    fn id(&self) -> Option<&Self::Id>;

    /// Pure conversion; performs no validation and never fails
    fn to_domain(form: Self::Form) -> Self;

    fn to_form(&self) -> Self::Form;

    /// Whether the availability toggle route is exposed
    fn supports_availability() -> bool {
        false
    }

    /// The same record with availability flipped
    fn toggle_availability(&self) -> Option<Self> {
        None
    }

    /// Validate a create payload. Any id in the body is dropped.
    fn validate_create(input: &Value) -> Result<Self::Form, FieldErrors> {
        let mut filtered =
            Self::validation_config(Operation::Create).validate_and_filter(input.clone())?;
        if let Value::Object(map) = &mut filtered {
            map.remove("id");
        }
        decode(filtered)
    }

    /// Validate an update payload against the id from the path
    ///
    /// The path id fills in a missing body id. A body id naming another
    /// record is an error on `id`, never overridden.
    fn validate_update(input: &Value, path_id: Option<&Self::Id>) -> Result<Self::Form, FieldErrors> {
        let Value::Object(mut map) = input.clone() else {
            return Err(FieldErrors::single("body", "Expected a JSON object"));
        };

        let path_value = path_id
            .map(|id| serde_json::to_value(id).map_err(|e| FieldErrors::single("id", e.to_string())))
            .transpose()?;

        if let Some(path_value) = &path_value {
            if map.get("id").is_none_or(Value::is_null) {
                map.insert("id".to_string(), path_value.clone());
            }
        }

        let filtered =
            Self::validation_config(Operation::Update).validate_and_filter(Value::Object(map))?;

        if let Some(path_value) = &path_value {
            if filtered.get("id") != Some(path_value) {
                return Err(FieldErrors::single(
                    "id",
                    "ID does not match the item being updated",
                ));
            }
        }
        decode(filtered)
    }

    /// Fully validate a record coming back from the store
    fn validate_record(input: Value) -> Result<Self, FieldErrors> {
        let filtered = Self::validation_config(Operation::Update).validate_and_filter(input)?;
        decode(filtered).map(Self::to_domain)
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, FieldErrors> {
    serde_json::from_value(value).map_err(|e| FieldErrors::single("body", e.to_string()))
}
