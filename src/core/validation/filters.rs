//! Reusable field filters
//!
//! These filters transform field values before validation

use anyhow::Result;
use serde_json::Value;

/// Filter: trim whitespace from string
pub fn trim() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| {
        if let Some(s) = value.as_str() {
            Ok(Value::String(s.trim().to_string()))
        } else {
            Ok(value)
        }
    }
}

/// Filter: render a JSON number as its shortest decimal string
///
/// Form fields carry numerics as text; clients that send a bare number
/// are brought into the same shape before the string rules run.
pub fn number_to_string() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| match value {
        Value::Number(n) => Ok(Value::String(n.to_string())),
        other => Ok(other),
    }
}

/// Filter: substitute a default when the field is absent
pub fn default_value(
    default: Value,
) -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    move |_: &str, value: Value| {
        if value.is_null() {
            Ok(default.clone())
        } else {
            Ok(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // === trim() ===

    #[test]
    fn test_trim_removes_whitespace() {
        let f = trim();
        let result = f("name", json!("  hello  ")).expect("should not fail");
        assert_eq!(result, json!("hello"));
    }

    #[test]
    fn test_trim_non_string_passthrough() {
        let f = trim();
        let result = f("price", json!(42)).expect("should not fail");
        assert_eq!(result, json!(42));
    }

    // === number_to_string() ===

    #[test]
    fn test_number_to_string_uses_shortest_form() {
        let f = number_to_string();
        assert_eq!(f("price", json!(15.99)).expect("should not fail"), json!("15.99"));
        assert_eq!(f("price", json!(12)).expect("should not fail"), json!("12"));
    }

    #[test]
    fn test_number_to_string_leaves_strings() {
        let f = number_to_string();
        assert_eq!(f("price", json!("4.50")).expect("should not fail"), json!("4.50"));
    }

    // === default_value() ===

    #[test]
    fn test_default_value_fills_missing() {
        let f = default_value(json!(true));
        assert_eq!(f("isAvailable", Value::Null).expect("should not fail"), json!(true));
        assert_eq!(f("isAvailable", json!(false)).expect("should not fail"), json!(false));
    }
}
