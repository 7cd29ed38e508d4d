//! Structural request-body validation for the Agrimarket platform.
//!
//! Every write endpoint checks the raw JSON body against a declarative
//! field table before anything reaches the store. The check walks the
//! whole table and reports every deviation at once, so a client fixing a
//! bad request sees all offending fields in a single round trip.

use std::str::FromStr;

use chrono::DateTime;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// A single validation failure, naming the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Accepted shapes for a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Any JSON string.
    Text,
    /// A decimal amount: a decimal-formatted string ("4.99") or a JSON
    /// number. Currency and rating fields travel as strings end to end;
    /// numbers are coerced on the way in.
    Decimal,
    /// A JSON number with no fractional part, within 32-bit range.
    Integer,
    /// A JSON boolean.
    Boolean,
    /// An ISO-8601 timestamp string.
    Timestamp,
}

impl FieldKind {
    fn check(self, value: &Value) -> Result<(), String> {
        match self {
            FieldKind::Text => {
                if value.is_string() {
                    Ok(())
                } else {
                    Err(format!("expected a string, got {}", json_type(value)))
                }
            }
            FieldKind::Decimal => match value {
                Value::String(s) => parse_decimal(s)
                    .map(|_| ())
                    .ok_or_else(|| format!("\"{s}\" is not a decimal amount")),
                Value::Number(n) => parse_decimal(&n.to_string())
                    .map(|_| ())
                    .ok_or_else(|| format!("{n} is out of range for a decimal amount")),
                other => Err(format!(
                    "expected a decimal string or number, got {}",
                    json_type(other)
                )),
            },
            FieldKind::Integer => {
                let fits = value.as_i64().map_or(false, |n| i32::try_from(n).is_ok());
                if fits {
                    Ok(())
                } else {
                    Err(format!("expected an integer, got {}", json_type(value)))
                }
            }
            FieldKind::Boolean => {
                if value.is_boolean() {
                    Ok(())
                } else {
                    Err(format!("expected a boolean, got {}", json_type(value)))
                }
            }
            FieldKind::Timestamp => match value.as_str() {
                Some(s) if DateTime::parse_from_rfc3339(s).is_ok() => Ok(()),
                Some(s) => Err(format!("\"{s}\" is not an ISO-8601 timestamp")),
                None => Err(format!(
                    "expected an ISO-8601 timestamp string, got {}",
                    json_type(value)
                )),
            },
        }
    }
}

/// One entry of an insert-shape schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// Check `body` against a schema, collecting every deviation.
///
/// A missing or `null` optional field passes; unknown extra fields are
/// ignored. An empty result means the body is structurally sound.
pub fn check_fields(body: &Value, schema: &[FieldSpec]) -> Vec<FieldError> {
    let Some(map) = body.as_object() else {
        return vec![FieldError::new("body", "expected a JSON object")];
    };

    let mut errors = Vec::new();
    for spec in schema {
        match map.get(spec.name) {
            None | Some(Value::Null) => {
                if spec.required {
                    errors.push(FieldError::new(spec.name, "required"));
                }
            }
            Some(value) => {
                if let Err(message) = spec.kind.check(value) {
                    errors.push(FieldError::new(spec.name, message));
                }
            }
        }
    }
    errors
}

/// Check `body` against a schema, then parse it into the typed insert
/// shape. The schema check runs first so the caller gets the full error
/// list; the serde pass only sees bodies that already satisfy the table.
pub fn parse_body<T: DeserializeOwned>(
    body: &Value,
    schema: &[FieldSpec],
) -> Result<T, Vec<FieldError>> {
    let errors = check_fields(body, schema);
    if !errors.is_empty() {
        return Err(errors);
    }
    serde_json::from_value(body.clone()).map_err(|e| vec![FieldError::new("body", e.to_string())])
}

/// Parse a decimal amount, tolerating scientific notation.
fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
