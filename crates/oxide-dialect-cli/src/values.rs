//! Conversion of JSON record values into typed field values.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use oxide_dialect_core::{
    FieldDescriptor, FieldValue, IntoFieldValue, SemanticType, TypeDescriptor,
};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{CliError, Result};

/// Converts a JSON object keyed by field name into field values.
///
/// Keys that name no field of the type are ignored.
///
/// # Errors
///
/// Returns [`CliError::ValuesNotObject`] for a non-object document and
/// [`CliError::InvalidValue`] for a value that does not fit its field.
pub fn record_values(
    ty: &TypeDescriptor,
    document: &Value,
) -> Result<HashMap<String, FieldValue>> {
    let object = document.as_object().ok_or(CliError::ValuesNotObject)?;
    let mut values = HashMap::with_capacity(object.len());
    for field in &ty.fields {
        if let Some(value) = object.get(&field.name) {
            values.insert(field.name.clone(), field_value(field, value)?);
        } else {
            tracing::debug!(field = %field.name, "No value supplied");
        }
    }
    Ok(values)
}

/// Converts one JSON value, guided by the field's semantic type.
///
/// # Errors
///
/// Returns [`CliError::InvalidValue`] if the value does not fit the field.
pub fn field_value(field: &FieldDescriptor, value: &Value) -> Result<FieldValue> {
    if value.is_null() {
        return Ok(FieldValue::Null);
    }
    let convert = |parsed: Option<FieldValue>, expected| {
        parsed.ok_or_else(|| CliError::InvalidValue {
            field: field.name.clone(),
            expected,
        })
    };

    match field.semantic_type {
        SemanticType::Boolean => convert(typed(value.as_bool()), "a boolean"),
        SemanticType::Decimal | SemanticType::Double => convert(typed(value.as_f64()), "a number"),
        t if t.is_numeric() => convert(typed(value.as_i64()), "an integer"),
        SemanticType::Uuid => convert(
            typed(value.as_str().and_then(|s| Uuid::parse_str(s).ok())),
            "a hyphenated UUID string",
        ),
        t if t.is_temporal() => convert(
            typed(value.as_str().and_then(parse_instant)),
            "an RFC 3339 timestamp or a yyyy-mm-dd date",
        ),
        SemanticType::Binary => convert(typed(bytes(value)), "an array of byte values"),
        SemanticType::Reference => {
            let id = match value {
                Value::String(s) => typed(Some(s.as_str())),
                Value::Number(n) => typed(n.as_i64()),
                _ => None,
            };
            convert(id, "an identifier")
        }
        _ => convert(typed(value.as_str()), "a string"),
    }
}

/// Lifts a successfully parsed value; `None` means the JSON did not fit.
fn typed<T: IntoFieldValue>(parsed: Option<T>) -> Option<FieldValue> {
    parsed.map(IntoFieldValue::into_field_value)
}

fn parse_instant(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn bytes(value: &Value) -> Option<Vec<u8>> {
    value
        .as_array()?
        .iter()
        .map(|item| item.as_u64().and_then(|n| u8::try_from(n).ok()))
        .collect()
}
