//! Oracle (thin driver) dialect.

use super::profile::{
    BooleanStyle, DialectProfile, Pagination, SequenceDefault, TemporalLiteral, Vendor,
};
use crate::schema::{FieldDescriptor, SemanticType, TemporalKind};

/// Identifiers Oracle rejects unquoted as column names.
pub const RESERVED_WORDS: &[&str] = &[
    "state", "audit", "comment", "number", "resource", "size", "uid", "date", "session",
];

/// Inline literal ceiling and large-object threshold, in characters.
pub const LITERAL_CEILING: usize = 4000;

pub(super) const fn profile() -> DialectProfile {
    DialectProfile {
        vendor: Vendor::Oracle,
        default_port: 1521,
        reserved_words: RESERVED_WORDS,
        max_identifier_length: Some(30),
        max_inline_literal: Some(LITERAL_CEILING),
        large_object_threshold: Some(LITERAL_CEILING),
        boolean_style: BooleanStyle::Numeric,
        native_uuid: false,
        has_array_support: false,
        native_upsert: false,
        pagination: Pagination::Rownum,
        one_row_table: Some("dual"),
        identifier_quote: '"',
        identifier_type: "varchar2(36)",
        sequence_default: SequenceDefault::NextvalSuffix,
        upper_case_catalog: true,
        date_literal: TemporalLiteral::Parse {
            function: "to_date",
            pattern: "%Y-%m-%d %H:%M:%S",
            mask: "yyyy-mm-dd hh24:mi:ss",
        },
        time_literal: TemporalLiteral::Parse {
            function: "to_date",
            pattern: "%Y-%m-%d %H:%M:%S",
            mask: "yyyy-mm-dd hh24:mi:ss",
        },
        datetime_literal: TemporalLiteral::Parse {
            function: "to_timestamp",
            pattern: "%Y-%m-%d %H:%M:%S%.3f",
            mask: "yyyy-mm-dd hh24:mi:ss.ff3",
        },
    }
}

/// Column type for a field; `None` for references.
pub(super) fn column_type(field: &FieldDescriptor, profile: &DialectProfile) -> Option<String> {
    let name = match field.semantic_type {
        SemanticType::String | SemanticType::Enum | SemanticType::Uri | SemanticType::Duration => {
            let threshold = profile.large_object_threshold.unwrap_or(LITERAL_CEILING);
            if field.max_length.is_some_and(|length| length > threshold) {
                "clob"
            } else {
                "varchar2(4000)"
            }
        }
        SemanticType::Integer => "number(10)",
        SemanticType::Long => "number(19)",
        SemanticType::Short => "number(5)",
        SemanticType::BigInteger => "number(*, 0)",
        SemanticType::Decimal => "number(*, 10)",
        SemanticType::Double => "number(19,4)",
        SemanticType::Boolean => "number(1, 0)",
        SemanticType::Uuid => "varchar2(36)",
        SemanticType::Date | SemanticType::Time | SemanticType::Datetime => {
            match field.temporal_kind() {
                Some(TemporalKind::Date) => "date",
                _ => "timestamp",
            }
        }
        SemanticType::Binary => "blob",
        SemanticType::Reference => return None,
    };
    Some(String::from(name))
}

/// Element type name for array binding.
pub(super) fn element_type(field: &FieldDescriptor, profile: &DialectProfile) -> Option<String> {
    if field.semantic_type.is_textual() {
        return Some(String::from("varchar2(255)"));
    }
    column_type(field, profile)
}

/// Binary literal.
pub(super) fn binary_literal(bytes: &[u8]) -> String {
    format!("hextoraw('{}')", super::hex(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oracle_type(field: &FieldDescriptor) -> Option<String> {
        column_type(field, &profile())
    }

    #[test]
    fn test_numeric_types() {
        let cases = [
            (SemanticType::Integer, "number(10)"),
            (SemanticType::Long, "number(19)"),
            (SemanticType::Short, "number(5)"),
            (SemanticType::BigInteger, "number(*, 0)"),
            (SemanticType::Decimal, "number(*, 10)"),
            (SemanticType::Double, "number(19,4)"),
            (SemanticType::Boolean, "number(1, 0)"),
        ];
        for (semantic_type, expected) in cases {
            assert_eq!(
                oracle_type(&FieldDescriptor::new("n", semantic_type)).as_deref(),
                Some(expected),
                "{semantic_type:?}"
            );
        }
    }

    #[test]
    fn test_long_text_becomes_clob() {
        let short = FieldDescriptor::new("note", SemanticType::String).max_length(4000);
        let long = FieldDescriptor::new("note", SemanticType::String).max_length(4001);
        assert_eq!(oracle_type(&short).as_deref(), Some("varchar2(4000)"));
        assert_eq!(oracle_type(&long).as_deref(), Some("clob"));
    }

    #[test]
    fn test_temporal_types_follow_format_hint() {
        let day = FieldDescriptor::new("day", SemanticType::Date);
        let at = FieldDescriptor::new("at", SemanticType::Datetime);
        let hinted = FieldDescriptor::new("at", SemanticType::Datetime).format(TemporalKind::Date);
        let time = FieldDescriptor::new("opens", SemanticType::Time);
        assert_eq!(oracle_type(&day).as_deref(), Some("date"));
        assert_eq!(oracle_type(&at).as_deref(), Some("timestamp"));
        assert_eq!(oracle_type(&hinted).as_deref(), Some("date"));
        assert_eq!(oracle_type(&time).as_deref(), Some("timestamp"));
    }

    #[test]
    fn test_reference_has_no_column_type() {
        assert_eq!(oracle_type(&FieldDescriptor::new("owner", SemanticType::Reference)), None);
    }

    #[test]
    fn test_element_type_for_text() {
        let field = FieldDescriptor::new("tags", SemanticType::String);
        assert_eq!(element_type(&field, &profile()).as_deref(), Some("varchar2(255)"));
    }

    #[test]
    fn test_binary_literal() {
        assert_eq!(binary_literal(&[0x00, 0xab, 0x10]), "hextoraw('00ab10')");
    }
}
