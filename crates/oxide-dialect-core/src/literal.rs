//! Type and literal mapping.
//!
//! Maps semantic field types to vendor column types and concrete values to
//! vendor literal text. Vendor differences come from the [`DialectProfile`]
//! passed in; nothing here consults global state.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::dialect::DialectProfile;
use crate::schema::{FieldDescriptor, SemanticType, TemporalKind};
use crate::value::FieldValue;

/// Returns the vendor column type of a field, or `None` for references.
#[must_use]
pub fn sql_type_for(field: &FieldDescriptor, profile: &DialectProfile) -> Option<String> {
    profile.column_type(field)
}

/// Renders a value as a vendor literal for the given field.
#[must_use]
pub fn literal_for(field: &FieldDescriptor, value: &FieldValue, profile: &DialectProfile) -> String {
    match value {
        FieldValue::Null => String::from("null"),
        FieldValue::Bool(b) => boolean_literal(*b, profile),
        FieldValue::Int(n) => n.to_string(),
        FieldValue::Float(f) if f.is_finite() => f.to_string(),
        FieldValue::Float(_) => String::from("null"),
        FieldValue::Text(s) => quote_string(s, profile),
        FieldValue::Uuid(u) => format!("'{}'", u.hyphenated()),
        FieldValue::Timestamp(instant) => {
            let kind = field.temporal_kind().unwrap_or(TemporalKind::Datetime);
            temporal_literal(kind, instant, profile)
        }
        FieldValue::Bytes(bytes) => profile.binary_literal(bytes),
    }
}

/// Renders a boolean as a keyword or as `1`/`0`.
#[must_use]
pub fn boolean_literal(value: bool, profile: &DialectProfile) -> String {
    let text = match (profile.numeric_booleans(), value) {
        (true, true) => "1",
        (true, false) => "0",
        (false, true) => "true",
        (false, false) => "false",
    };
    String::from(text)
}

/// Renders a date/time instant in the profile's format for the sub-kind.
#[must_use]
pub fn temporal_literal(kind: TemporalKind, instant: &DateTime<Utc>, profile: &DialectProfile) -> String {
    match kind {
        TemporalKind::Date => profile.date_literal.render(instant),
        TemporalKind::Time => profile.time_literal.render(instant),
        TemporalKind::Datetime => profile.datetime_literal.render(instant),
    }
}

/// Single-quotes a string, doubling embedded quotes.
///
/// Values longer than the vendor's inline-literal ceiling keep their last
/// characters: over-length values are diagnostic text where the tail matters.
#[must_use]
pub fn quote_string(value: &str, profile: &DialectProfile) -> String {
    let kept = match profile.max_inline_literal {
        Some(max) => {
            let length = value.chars().count();
            if length > max {
                tracing::debug!(length, max, "Truncating string literal to its suffix");
                let skip = length - max;
                value.char_indices().nth(skip).map_or(value, |(at, _)| &value[at..])
            } else {
                value
            }
        }
        None => value,
    };
    format!("'{}'", kept.replace('\'', "''"))
}

/// Returns the value used for a field with no supplied value.
///
/// Mandatory UUIDs get a fresh identifier, date/time fields the shared `now`,
/// numbers zero and booleans false. Everything else, and every nullable
/// field, is null.
#[must_use]
pub fn default_for_missing(field: &FieldDescriptor, now: DateTime<Utc>) -> FieldValue {
    if field.nullable {
        return FieldValue::Null;
    }
    match field.semantic_type {
        SemanticType::Uuid => FieldValue::Uuid(Uuid::new_v4()),
        t if t.is_temporal() => FieldValue::Timestamp(now),
        SemanticType::Decimal | SemanticType::Double => FieldValue::Float(0.0),
        t if t.is_numeric() => FieldValue::Int(0),
        SemanticType::Boolean => FieldValue::Bool(false),
        _ => FieldValue::Null,
    }
}
