//! PostgreSQL dialect.

use super::profile::{
    BooleanStyle, DialectProfile, Pagination, SequenceDefault, TemporalLiteral, Vendor,
};
use crate::schema::{FieldDescriptor, SemanticType, TemporalKind};

pub(super) const fn profile() -> DialectProfile {
    DialectProfile {
        vendor: Vendor::Postgres,
        default_port: 5432,
        reserved_words: &[],
        max_identifier_length: None,
        max_inline_literal: None,
        large_object_threshold: None,
        boolean_style: BooleanStyle::Native,
        native_uuid: true,
        has_array_support: true,
        native_upsert: true,
        pagination: Pagination::LimitOffset,
        one_row_table: None,
        identifier_quote: '"',
        identifier_type: "uuid",
        sequence_default: SequenceDefault::NextvalFunction,
        upper_case_catalog: false,
        date_literal: TemporalLiteral::Typed {
            type_name: "date",
            pattern: "%Y-%m-%d",
        },
        time_literal: TemporalLiteral::Typed {
            type_name: "time",
            pattern: "%H:%M:%S%.3f",
        },
        datetime_literal: TemporalLiteral::Typed {
            type_name: "timestamp",
            pattern: "%Y-%m-%d %H:%M:%S%.3f",
        },
    }
}

pub(super) fn column_type(field: &FieldDescriptor) -> Option<String> {
    let name = match field.semantic_type {
        SemanticType::String | SemanticType::Enum | SemanticType::Uri => {
            return Some(
                field
                    .max_length
                    .map_or_else(|| String::from("text"), |length| format!("varchar({length})")),
            );
        }
        SemanticType::Duration => "interval",
        SemanticType::Integer => "integer",
        SemanticType::Long => "bigint",
        SemanticType::Short => "smallint",
        SemanticType::BigInteger | SemanticType::Decimal => "numeric",
        SemanticType::Double => "double precision",
        SemanticType::Boolean => "boolean",
        SemanticType::Uuid => "uuid",
        SemanticType::Date | SemanticType::Time | SemanticType::Datetime => {
            match field.temporal_kind() {
                Some(TemporalKind::Date) => "date",
                Some(TemporalKind::Time) => "time",
                _ => "timestamp",
            }
        }
        SemanticType::Binary => "bytea",
        SemanticType::Reference => return None,
    };
    Some(String::from(name))
}

pub(super) fn binary_literal(bytes: &[u8]) -> String {
    format!("'\\x{}'::bytea", super::hex(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_types() {
        let bounded = FieldDescriptor::new("name", SemanticType::String).max_length(80);
        let unbounded = FieldDescriptor::new("name", SemanticType::String);
        assert_eq!(column_type(&bounded).as_deref(), Some("varchar(80)"));
        assert_eq!(column_type(&unbounded).as_deref(), Some("text"));
    }

    #[test]
    fn test_native_types() {
        assert_eq!(
            column_type(&FieldDescriptor::new("ok", SemanticType::Boolean)).as_deref(),
            Some("boolean")
        );
        assert_eq!(
            column_type(&FieldDescriptor::new("id", SemanticType::Uuid)).as_deref(),
            Some("uuid")
        );
    }

    #[test]
    fn test_binary_literal() {
        assert_eq!(binary_literal(&[0xde, 0xad]), "'\\xdead'::bytea");
    }
}
