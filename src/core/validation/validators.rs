//! Reusable field validators
//!
//! Every validator takes the message it reports, so the entity table reads
//! like the list of rules a user sees. A validator that does not apply to
//! the JSON type it receives lets the value through; the type checks
//! (`text`, `number`, `boolean`) are what reject wrong types.

use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use std::sync::OnceLock;

fn decimal_string_regex() -> &'static regex::Regex {
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    RE.get_or_init(|| regex::Regex::new(r"^\d+(?:\.(\d+))?$").unwrap())
}

/// Number, or a string that parses as a finite number
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Validator: field is present and not null
pub fn required(
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| {
        if value.is_null() {
            Err(message.to_string())
        } else {
            Ok(())
        }
    }
}

/// Validator: present, and not empty or whitespace-only if it is a string
pub fn not_empty(
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| match value {
        Value::Null => Err(message.to_string()),
        Value::String(s) if s.trim().is_empty() => Err(message.to_string()),
        _ => Ok(()),
    }
}

/// Validator: value is a string
pub fn text(
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| {
        if value.is_string() {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }
}

/// Validator: string length, counted in characters, within `min..=max`
pub fn string_length(
    min: usize,
    max: usize,
    too_short: &'static str,
    too_long: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            let len = s.chars().count();
            if len < min {
                Err(too_short.to_string())
            } else if len > max {
                Err(too_long.to_string())
            } else {
                Ok(())
            }
        } else {
            Ok(())
        }
    }
}

/// Validator: value is a JSON number
pub fn number(
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| {
        if value.is_number() {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }
}

/// Validator: string parses as a finite number
pub fn numeric_string(
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            if s.parse::<f64>().is_ok_and(f64::is_finite) {
                Ok(())
            } else {
                Err(message.to_string())
            }
        } else {
            Ok(())
        }
    }
}

/// Validator: number (or numeric string) is strictly greater than zero
pub fn positive(
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| match numeric(value) {
        Some(n) if n <= 0.0 => Err(message.to_string()),
        _ => Ok(()),
    }
}

/// Validator: number (or numeric string) does not exceed `max`
pub fn max_value(
    max: f64,
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| match numeric(value) {
        Some(n) if n > max => Err(message.to_string()),
        _ => Ok(()),
    }
}

/// Validator: at most `places` fractional digits
///
/// Strings must be plain unsigned decimals (`12`, `12.5`, `12.50`).
/// Numbers are checked on their shortest decimal form, so `0.1 + 0.2`
/// style float noise in the binary value does not count.
pub fn decimal_places(
    places: u32,
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| match value {
        Value::String(s) => {
            let ok = decimal_string_regex()
                .captures(s)
                .map(|caps| {
                    caps.get(1)
                        .is_none_or(|frac| frac.as_str().len() <= places as usize)
                })
                .unwrap_or(false);
            if ok { Ok(()) } else { Err(message.to_string()) }
        }
        Value::Number(n) => {
            let repr = n.to_string();
            let scale = Decimal::from_str(&repr)
                .or_else(|_| Decimal::from_scientific(&repr))
                .map(|d| d.normalize().scale());
            match scale {
                Ok(scale) if scale <= places => Ok(()),
                Ok(_) => Err(message.to_string()),
                // Beyond Decimal's range every f64 is a whole number
                Err(_) if n.as_f64().is_some_and(|f| f.fract() == 0.0) => Ok(()),
                Err(_) => Err(message.to_string()),
            }
        }
        _ => Ok(()),
    }
}

/// Validator: string is one of the allowed values
pub fn in_list(
    allowed: &'static [&'static str],
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| match value.as_str() {
        Some(s) if allowed.iter().any(|a| *a == s) => Ok(()),
        _ => Err(message.to_string()),
    }
}

/// Validator: string is a well-formed absolute URL
///
/// Only the syntax is checked; the target is never contacted.
pub fn url(
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| match value.as_str() {
        Some(s) if reqwest::Url::parse(s).is_ok() => Ok(()),
        _ => Err(message.to_string()),
    }
}

/// Validator: value is a JSON boolean
pub fn boolean(
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| {
        if value.is_boolean() {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }
}

/// Validator: optional, but a positive integer when present
pub fn positive_integer(
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| match value {
        Value::Null => Ok(()),
        v if v.as_u64().is_some_and(|n| n > 0) => Ok(()),
        _ => Err(message.to_string()),
    }
}
