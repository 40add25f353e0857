//! Immutable per-vendor configuration.

use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, Utc};

use super::{oracle, postgres};
use crate::error::DialectError;
use crate::schema::FieldDescriptor;

/// Database products with a dialect profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vendor {
    /// Oracle Database (thin driver).
    Oracle,
    /// PostgreSQL.
    Postgres,
}

impl Vendor {
    /// Returns the canonical lowercase vendor name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Oracle => "oracle",
            Self::Postgres => "postgresql",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Vendor {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "oracle" => Ok(Self::Oracle),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            _ => Err(DialectError::UnknownVendor(String::from(s))),
        }
    }
}

/// How boolean values are represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanStyle {
    /// `true` / `false` keywords.
    Native,
    /// `1` / `0`; hand-written `true`/`false` keywords are rewritten.
    Numeric,
}

/// How `offset`/`limit` are applied to a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// Wrap the query and filter on the `rownum` pseudo-column.
    Rownum,
    /// Append native `limit` / `offset` clauses.
    LimitOffset,
}

/// How a generated column draws its value from a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceDefault {
    /// `seq_name.nextval`
    NextvalSuffix,
    /// `nextval('seq_name')`
    NextvalFunction,
}

impl SequenceDefault {
    /// Renders the default expression for the given sequence.
    #[must_use]
    pub fn render(self, sequence: &str) -> String {
        match self {
            Self::NextvalSuffix => format!("{sequence}.nextval"),
            Self::NextvalFunction => format!("nextval('{sequence}')"),
        }
    }
}

/// How a date/time literal is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalLiteral {
    /// `function('<text>', '<mask>')`, for vendors without an implicit cast.
    Parse {
        /// Vendor parse function (e.g. `to_timestamp`).
        function: &'static str,
        /// `chrono` format pattern for the text.
        pattern: &'static str,
        /// Vendor format mask matching `pattern`.
        mask: &'static str,
    },
    /// `<type> '<text>'`
    Typed {
        /// SQL type keyword (e.g. `timestamp`).
        type_name: &'static str,
        /// `chrono` format pattern for the text.
        pattern: &'static str,
    },
}

impl TemporalLiteral {
    /// Renders an instant (in UTC) as a SQL literal.
    #[must_use]
    pub fn render(&self, instant: &DateTime<Utc>) -> String {
        match self {
            Self::Parse {
                function,
                pattern,
                mask,
            } => format!("{function}('{}', '{mask}')", instant.format(pattern)),
            Self::Typed { type_name, pattern } => {
                format!("{type_name} '{}'", instant.format(pattern))
            }
        }
    }
}

/// Vendor facts and formatting rules, constructed once per target vendor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialectProfile {
    /// The vendor this profile describes.
    pub vendor: Vendor,
    /// Default network port, for connection defaults.
    pub default_port: u16,
    /// Words that must be quoted when used as identifiers (lowercase).
    pub reserved_words: &'static [&'static str],
    /// Maximum identifier length, if the vendor enforces one.
    pub max_identifier_length: Option<usize>,
    /// Maximum length of an inline string literal.
    pub max_inline_literal: Option<usize>,
    /// Declared string lengths above this are bound as large objects.
    pub large_object_threshold: Option<usize>,
    /// Boolean representation.
    pub boolean_style: BooleanStyle,
    /// Whether UUIDs bind natively; otherwise they bind as text.
    pub native_uuid: bool,
    /// Whether the driver can bind array values.
    pub has_array_support: bool,
    /// Whether `insert ... on conflict ... do update` runs natively.
    pub native_upsert: bool,
    /// Pagination strategy.
    pub pagination: Pagination,
    /// One-row table for `select` without a real source (e.g. `dual`).
    pub one_row_table: Option<&'static str>,
    /// Identifier quote character.
    pub identifier_quote: char,
    /// Column type of surrogate `<name>_id` reference columns.
    pub identifier_type: &'static str,
    /// Sequence default expression style.
    pub sequence_default: SequenceDefault,
    /// Whether catalog lookups expect upper-cased table names.
    pub upper_case_catalog: bool,
    /// Date literal format.
    pub date_literal: TemporalLiteral,
    /// Time literal format.
    pub time_literal: TemporalLiteral,
    /// Datetime literal format (millisecond precision).
    pub datetime_literal: TemporalLiteral,
}

impl DialectProfile {
    /// Builds the Oracle profile.
    #[must_use]
    pub const fn oracle() -> Self {
        oracle::profile()
    }

    /// Builds the PostgreSQL profile.
    #[must_use]
    pub const fn postgres() -> Self {
        postgres::profile()
    }

    /// Builds the profile for a vendor.
    #[must_use]
    pub const fn for_vendor(vendor: Vendor) -> Self {
        match vendor {
            Vendor::Oracle => Self::oracle(),
            Vendor::Postgres => Self::postgres(),
        }
    }

    /// Returns true if `word` case-insensitively matches a reserved word.
    #[must_use]
    pub fn is_reserved(&self, word: &str) -> bool {
        self.reserved_words
            .iter()
            .any(|reserved| reserved.eq_ignore_ascii_case(word))
    }

    /// Returns true if booleans are written as `1`/`0`.
    #[must_use]
    pub fn numeric_booleans(&self) -> bool {
        self.boolean_style == BooleanStyle::Numeric
    }

    /// Wraps a name in the vendor's identifier quotes.
    #[must_use]
    pub fn quote(&self, name: &str) -> String {
        let q = self.identifier_quote;
        format!("{q}{name}{q}")
    }

    /// Returns the column type for a field, or `None` for references.
    #[must_use]
    pub fn column_type(&self, field: &FieldDescriptor) -> Option<String> {
        match self.vendor {
            Vendor::Oracle => oracle::column_type(field, self),
            Vendor::Postgres => postgres::column_type(field),
        }
    }

    /// Returns the element type used when binding an array of this field.
    #[must_use]
    pub fn array_element_type(&self, field: &FieldDescriptor) -> Option<String> {
        match self.vendor {
            Vendor::Oracle => oracle::element_type(field, self),
            Vendor::Postgres => postgres::column_type(field),
        }
    }

    /// Renders a binary value as a literal.
    #[must_use]
    pub fn binary_literal(&self, bytes: &[u8]) -> String {
        match self.vendor {
            Vendor::Oracle => oracle::binary_literal(bytes),
            Vendor::Postgres => postgres::binary_literal(bytes),
        }
    }

    /// Normalizes a table name for catalog lookups.
    #[must_use]
    pub fn standardize_table_pattern(&self, table: &str) -> String {
        if self.upper_case_catalog {
            table.to_uppercase()
        } else {
            String::from(table)
        }
    }
}
