//! Concrete field values.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A concrete value for a field, rendered as a literal or bound.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value (strings, URIs, enum constants, durations).
    Text(String),
    /// UUID value.
    Uuid(Uuid),
    /// Date, time or datetime instant.
    Timestamp(DateTime<Utc>),
    /// Binary value.
    Bytes(Vec<u8>),
}

impl FieldValue {
    /// Returns true for [`FieldValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the textual form streamed into a large object.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Null | Self::Bytes(_) => None,
            Self::Text(s) => Some(s.clone()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Int(n) => Some(n.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::Uuid(u) => Some(u.hyphenated().to_string()),
            Self::Timestamp(t) => Some(t.to_rfc3339()),
        }
    }
}

/// Trait for types that can be converted to field values.
pub trait IntoFieldValue {
    /// Converts the value to a `FieldValue`.
    fn into_field_value(self) -> FieldValue;
}

impl IntoFieldValue for FieldValue {
    fn into_field_value(self) -> FieldValue {
        self
    }
}

impl IntoFieldValue for bool {
    fn into_field_value(self) -> FieldValue {
        FieldValue::Bool(self)
    }
}

impl IntoFieldValue for i64 {
    fn into_field_value(self) -> FieldValue {
        FieldValue::Int(self)
    }
}

impl IntoFieldValue for i32 {
    fn into_field_value(self) -> FieldValue {
        FieldValue::Int(i64::from(self))
    }
}

impl IntoFieldValue for f64 {
    fn into_field_value(self) -> FieldValue {
        FieldValue::Float(self)
    }
}

impl IntoFieldValue for String {
    fn into_field_value(self) -> FieldValue {
        FieldValue::Text(self)
    }
}

impl IntoFieldValue for &str {
    fn into_field_value(self) -> FieldValue {
        FieldValue::Text(String::from(self))
    }
}

impl IntoFieldValue for Uuid {
    fn into_field_value(self) -> FieldValue {
        FieldValue::Uuid(self)
    }
}

impl IntoFieldValue for DateTime<Utc> {
    fn into_field_value(self) -> FieldValue {
        FieldValue::Timestamp(self)
    }
}

impl IntoFieldValue for Vec<u8> {
    fn into_field_value(self) -> FieldValue {
        FieldValue::Bytes(self)
    }
}

impl<T: IntoFieldValue> IntoFieldValue for Option<T> {
    fn into_field_value(self) -> FieldValue {
        self.map_or(FieldValue::Null, IntoFieldValue::into_field_value)
    }
}
