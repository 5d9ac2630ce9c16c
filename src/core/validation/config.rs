//! Per-entity field constraint table

use crate::core::error::FieldErrors;
use serde_json::{Map, Value};

type Validator = Box<dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync>;
type Filter = Box<dyn Fn(&str, Value) -> anyhow::Result<Value> + Send + Sync>;

#[derive(Default)]
struct FieldRules {
    filters: Vec<Filter>,
    validators: Vec<Validator>,
}

/// Ordered list of fields, each with its filters and validators
///
/// Filters run first (in registration order), then validators. Every field
/// is checked, but within one field the first failing validator wins.
pub struct EntityValidationConfig {
    pub entity_type: String,
    fields: Vec<(String, FieldRules)>,
}

impl EntityValidationConfig {
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            fields: Vec::new(),
        }
    }

    fn rules_mut(&mut self, field: &str) -> &mut FieldRules {
        let index = match self.fields.iter().position(|(name, _)| name == field) {
            Some(index) => index,
            None => {
                self.fields.push((field.to_string(), FieldRules::default()));
                self.fields.len() - 1
            }
        };
        &mut self.fields[index].1
    }

    /// Add a validator for a field
    pub fn add_validator<F>(&mut self, field: &str, validator: F) -> &mut Self
    where
        F: Fn(&str, &Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.rules_mut(field).validators.push(Box::new(validator));
        self
    }

    /// Add a filter for a field
    pub fn add_filter<F>(&mut self, field: &str, filter: F) -> &mut Self
    where
        F: Fn(&str, Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.rules_mut(field).filters.push(Box::new(filter));
        self
    }

    /// Names of the declared fields, in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Filter then validate a payload
    ///
    /// Keys that are not declared pass through untouched. A filtered value
    /// of `null` removes the key.
    pub fn validate_and_filter(&self, payload: Value) -> Result<Value, FieldErrors> {
        let Value::Object(mut object) = payload else {
            return Err(FieldErrors::single("body", "Expected a JSON object"));
        };

        let mut errors = FieldErrors::new();
        let mut filtered = Map::new();

        for (field, rules) in &self.fields {
            let field = field.as_str();
            let mut value = object.remove(field).unwrap_or(Value::Null);

            for filter in &rules.filters {
                value = match filter(field, value) {
                    Ok(v) => v,
                    Err(e) => {
                        errors.insert(field, e.to_string());
                        Value::Null
                    }
                };
            }
            if errors.contains(field) {
                continue;
            }

            if let Some(message) = rules
                .validators
                .iter()
                .find_map(|validator| validator(field, &value).err())
            {
                errors.insert(field, message);
                continue;
            }

            if !value.is_null() {
                filtered.insert(field.to_string(), value);
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        for (key, value) in object {
            filtered.entry(key).or_insert(value);
        }
        Ok(Value::Object(filtered))
    }
}
