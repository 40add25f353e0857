//! Helpers for the parameter-binding layer.
//!
//! The binding layer itself lives outside this crate. These functions tell it
//! which value goes into each named parameter, in what representation, and
//! whether it must be streamed as a large object.

use std::collections::HashMap;
use std::io::Write;

use crate::dialect::DialectProfile;
use crate::error::{DialectError, Result};
use crate::identifier::uncamelify;
use crate::lexer::{TokenKind, tokenize};
use crate::schema::{FieldDescriptor, SemanticType};
use crate::value::FieldValue;

/// How a value is handed to the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindHint {
    /// Bound as a regular parameter.
    Inline,
    /// Streamed into a vendor large-object handle.
    LargeObject,
}

/// One named parameter of a statement and the value bound to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// Parameter name, without the `:` marker.
    pub parameter: String,
    /// Name of the field the parameter binds, if one matches.
    pub field: Option<String>,
    /// Value converted to the vendor representation.
    pub value: FieldValue,
    /// Binding strategy.
    pub hint: BindHint,
}

/// Vendor collection type used to bind an array field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayType {
    /// Collection type name (`<COLUMN>_ARRAY`).
    pub type_name: String,
    /// SQL type of the elements.
    pub element_type: String,
}

/// Returns the binding strategy for a field.
#[must_use]
pub fn bind_hint(field: &FieldDescriptor, profile: &DialectProfile) -> BindHint {
    match (profile.large_object_threshold, field.max_length) {
        (Some(threshold), Some(length))
            if field.semantic_type.is_textual() && length > threshold =>
        {
            BindHint::LargeObject
        }
        _ => BindHint::Inline,
    }
}

/// Converts a value to the representation the vendor binds.
///
/// Numeric-boolean vendors get `1`/`0`; vendors without a UUID type get the
/// hyphenated text form.
#[must_use]
pub fn target_value(value: FieldValue, profile: &DialectProfile) -> FieldValue {
    match value {
        FieldValue::Bool(b) if profile.numeric_booleans() => FieldValue::Int(i64::from(b)),
        FieldValue::Uuid(u) if !profile.native_uuid => FieldValue::Text(u.hyphenated().to_string()),
        other => other,
    }
}

/// Lists the named parameters of a statement in order, with their values.
///
/// Parameters are matched to fields by field name or column name. Text inside
/// string literals is never taken for a parameter, and `::` casts are not
/// parameter markers. A parameter without a value binds null.
#[must_use]
pub fn bind_plan(
    sql: &str,
    fields: &[FieldDescriptor],
    values: &HashMap<String, FieldValue>,
    profile: &DialectProfile,
) -> Vec<Binding> {
    let tokens = tokenize(sql);
    let mut plan = Vec::new();

    for pair in tokens.windows(2) {
        if pair[0].kind != TokenKind::Colon || !pair[0].span.touches(pair[1].span) {
            continue;
        }
        let Some(parameter) = pair[1].as_word() else {
            continue;
        };

        let field = fields.iter().find(|f| {
            f.name == parameter || f.column_name().eq_ignore_ascii_case(parameter)
        });
        let value = field
            .and_then(|f| values.get(&f.name))
            .or_else(|| values.get(parameter))
            .cloned()
            .unwrap_or(FieldValue::Null);
        let hint = field.map_or(BindHint::Inline, |f| bind_hint(f, profile));

        plan.push(Binding {
            parameter: String::from(parameter),
            field: field.map(|f| f.name.clone()),
            value: target_value(value, profile),
            hint,
        });
    }

    tracing::trace!(parameters = plan.len(), "Built bind plan");
    plan
}

/// Streams a value into a large-object writer and flushes it.
///
/// # Errors
///
/// Returns [`DialectError::LargeObjectWrite`] wrapping the I/O failure.
pub fn write_large_object<W: Write>(writer: &mut W, field: &str, value: &FieldValue) -> Result<()> {
    let map_err = |source| DialectError::LargeObjectWrite {
        field: String::from(field),
        source,
    };
    match value {
        FieldValue::Bytes(bytes) => writer.write_all(bytes).map_err(map_err)?,
        other => {
            let text = other.as_text().unwrap_or_default();
            writer.write_all(text.as_bytes()).map_err(map_err)?;
        }
    }
    writer.flush().map_err(map_err)
}

/// Returns the collection type used to bind an array of the field's values.
///
/// Callers check [`DialectProfile::has_array_support`] first.
///
/// # Errors
///
/// Returns [`DialectError::UnresolvableArrayType`] if the element type has no
/// SQL name (reference fields).
pub fn array_type(field: &FieldDescriptor, profile: &DialectProfile) -> Result<ArrayType> {
    if field.semantic_type == SemanticType::Reference {
        return Err(DialectError::UnresolvableArrayType {
            field: field.name.clone(),
        });
    }
    let element_type = profile
        .array_element_type(field)
        .ok_or_else(|| DialectError::UnresolvableArrayType {
            field: field.name.clone(),
        })?;
    Ok(ArrayType {
        type_name: format!("{}_array", uncamelify(&field.name)).to_uppercase(),
        element_type,
    })
}

#[cfg(test)]
mod tests {
    use std::io;

    use uuid::Uuid;

    use super::*;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("handle closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("id", SemanticType::Uuid),
            FieldDescriptor::new("active", SemanticType::Boolean),
            FieldDescriptor::new("payload", SemanticType::String).max_length(100_000),
            FieldDescriptor::new("userId", SemanticType::Uuid),
        ]
    }

    #[test]
    fn test_bind_plan_order_and_conversion() {
        let id = Uuid::nil();
        let values = HashMap::from([
            (String::from("id"), FieldValue::Uuid(id)),
            (String::from("active"), FieldValue::Bool(true)),
            (String::from("payload"), FieldValue::Text(String::from("x"))),
        ]);
        let plan = bind_plan(
            "update t set active = :active, payload = :payload where id = :id and note <> ':skip'",
            &fields(),
            &values,
            &DialectProfile::oracle(),
        );
        let names: Vec<&str> = plan.iter().map(|b| b.parameter.as_str()).collect();
        assert_eq!(names, vec!["active", "payload", "id"]);
        assert_eq!(plan[0].value, FieldValue::Int(1));
        assert_eq!(plan[1].hint, BindHint::LargeObject);
        assert_eq!(
            plan[2].value,
            FieldValue::Text(String::from("00000000-0000-0000-0000-000000000000"))
        );
    }

    #[test]
    fn test_bind_plan_matches_column_names_and_skips_casts() {
        let plan = bind_plan(
            "select :user_id::text, :unknown",
            &fields(),
            &HashMap::new(),
            &DialectProfile::postgres(),
        );
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].field.as_deref(), Some("userId"));
        assert_eq!(plan[1].field, None);
        assert_eq!(plan[1].value, FieldValue::Null);
    }

    #[test]
    fn test_native_vendor_keeps_values() {
        let value = target_value(FieldValue::Bool(false), &DialectProfile::postgres());
        assert_eq!(value, FieldValue::Bool(false));
    }

    #[test]
    fn test_write_large_object() {
        let mut buffer = Vec::new();
        write_large_object(&mut buffer, "payload", &FieldValue::Text(String::from("long text")))
            .expect("written");
        assert_eq!(buffer, b"long text");
    }

    #[test]
    fn test_write_large_object_failure() {
        let err = write_large_object(&mut FailingWriter, "payload", &FieldValue::Text(String::from("x")))
            .expect_err("write fails");
        assert!(matches!(err, DialectError::LargeObjectWrite { ref field, .. } if field == "payload"));
        assert!(err.to_string().contains("handle closed"));
    }

    #[test]
    fn test_array_type() {
        let field = FieldDescriptor::new("tagNames", SemanticType::String);
        let array = array_type(&field, &DialectProfile::oracle()).expect("array type");
        assert_eq!(array.type_name, "TAG_NAMES_ARRAY");
        assert_eq!(array.element_type, "varchar2(255)");
    }

    #[test]
    fn test_array_type_unresolvable() {
        let field = FieldDescriptor::new("owner", SemanticType::Reference);
        let err = array_type(&field, &DialectProfile::oracle()).expect_err("unresolvable");
        assert!(matches!(err, DialectError::UnresolvableArrayType { field } if field == "owner"));
    }
}
