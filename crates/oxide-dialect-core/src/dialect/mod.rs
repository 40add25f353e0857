//! Vendor dialects.
//!
//! A [`DialectProfile`] holds every vendor difference as data, selected once
//! from a [`Vendor`]. The [`Dialect`] facade pairs a profile with the compiled
//! upsert gate and exposes the translation and generation operations.

mod oracle;
mod postgres;
mod profile;

use std::collections::HashMap;

pub use oracle::{LITERAL_CEILING, RESERVED_WORDS as ORACLE_RESERVED_WORDS};
pub use profile::{
    BooleanStyle, DialectProfile, Pagination, SequenceDefault, TemporalLiteral, Vendor,
};

use crate::binding::{self, ArrayType, Binding};
use crate::ddl;
use crate::error::{DialectError, Result};
use crate::insert;
use crate::rewrite::{self, UpsertGate};
use crate::schema::{FieldDescriptor, SchemaResolver, TypeDescriptor};
use crate::value::FieldValue;

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}

/// Per-vendor translation engine.
///
/// Immutable after construction; share it by reference across threads.
#[derive(Debug, Clone)]
pub struct Dialect {
    profile: DialectProfile,
    gate: UpsertGate,
}

impl Dialect {
    /// Creates the dialect for a vendor.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::Gate`] if the upsert gate fails to compile.
    pub fn new(vendor: Vendor) -> Result<Self> {
        Self::with_profile(DialectProfile::for_vendor(vendor))
    }

    /// Creates a dialect from an explicit profile.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::Gate`] if the upsert gate fails to compile.
    pub fn with_profile(profile: DialectProfile) -> Result<Self> {
        tracing::debug!(vendor = %profile.vendor, "Creating dialect");
        Ok(Self {
            profile,
            gate: UpsertGate::new()?,
        })
    }

    /// Returns the vendor profile.
    #[must_use]
    pub const fn profile(&self) -> &DialectProfile {
        &self.profile
    }

    /// Returns the vendor.
    #[must_use]
    pub const fn vendor(&self) -> Vendor {
        self.profile.vendor
    }

    /// Default network port of the vendor.
    #[must_use]
    pub const fn default_port(&self) -> u16 {
        self.profile.default_port
    }

    /// Whether the driver can bind arrays.
    #[must_use]
    pub const fn has_array_support(&self) -> bool {
        self.profile.has_array_support
    }

    /// Maximum inline string literal length.
    #[must_use]
    pub const fn max_inline_literal(&self) -> Option<usize> {
        self.profile.max_inline_literal
    }

    /// Declared length above which text binds as a large object.
    #[must_use]
    pub const fn large_object_threshold(&self) -> Option<usize> {
        self.profile.large_object_threshold
    }

    /// Reserved words quoted when used as identifiers.
    #[must_use]
    pub const fn reserved_words(&self) -> &'static [&'static str] {
        self.profile.reserved_words
    }

    /// Column type for a field.
    #[must_use]
    pub fn sql_type_for(&self, field: &FieldDescriptor) -> Option<String> {
        self.profile.column_type(field)
    }

    /// Normalizes a table name for catalog lookups.
    #[must_use]
    pub fn standardize_table_pattern(&self, table: &str) -> String {
        self.profile.standardize_table_pattern(table)
    }

    /// Translates a hand-written statement for the vendor.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::MalformedUpsert`] or
    /// [`DialectError::UnknownConflictColumn`] for an upsert the vendor must
    /// run as a merge but which does not follow the upsert grammar.
    pub fn rewrite(&self, sql: &str) -> Result<String> {
        rewrite::rewrite(sql, &self.profile, &self.gate)
    }

    /// Applies an offset and limit to a query.
    #[must_use]
    pub fn limit(&self, sql: &str, offset: Option<u64>, limit: Option<u64>) -> String {
        rewrite::apply_limit(sql, offset, limit, &self.profile)
    }

    /// Builds the `create table` script for a type.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::UnresolvedType`] or
    /// [`DialectError::UnknownForeignKeyField`] for a foreign key that does
    /// not resolve.
    pub fn build_create_table(
        &self,
        ty: &TypeDescriptor,
        resolver: &dyn SchemaResolver,
        compact: bool,
    ) -> Result<String> {
        ddl::build_create_table(ty, resolver, &self.profile, compact)
    }

    /// Builds a literal `insert` for one record.
    #[must_use]
    pub fn build_insert_literal(
        &self,
        ty: &TypeDescriptor,
        values: &HashMap<String, FieldValue>,
        compact: bool,
    ) -> String {
        insert::build_insert_literal(ty, values, &self.profile, compact)
    }

    /// Lists the named parameters of a statement with their values.
    #[must_use]
    pub fn bind_plan(
        &self,
        sql: &str,
        fields: &[FieldDescriptor],
        values: &HashMap<String, FieldValue>,
    ) -> Vec<Binding> {
        binding::bind_plan(sql, fields, values, &self.profile)
    }

    /// Returns the collection type for binding an array field.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::UnresolvableArrayType`] if the element type has
    /// no SQL name.
    pub fn array_type(&self, field: &FieldDescriptor) -> Result<ArrayType> {
        binding::array_type(field, &self.profile)
    }
}

impl TryFrom<Vendor> for Dialect {
    type Error = DialectError;

    fn try_from(vendor: Vendor) -> Result<Self> {
        Self::new(vendor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SemanticType;

    fn oracle() -> Dialect {
        Dialect::new(Vendor::Oracle).expect("dialect")
    }

    #[test]
    fn test_static_facts() {
        let oracle = oracle();
        assert_eq!(oracle.vendor(), Vendor::Oracle);
        assert_eq!(oracle.default_port(), 1521);
        assert_eq!(oracle.max_inline_literal(), Some(4000));
        assert_eq!(oracle.large_object_threshold(), Some(4000));
        assert!(!oracle.has_array_support());
        assert!(oracle.reserved_words().contains(&"session"));

        let postgres = Dialect::try_from(Vendor::Postgres).expect("dialect");
        assert_eq!(postgres.default_port(), 5432);
        assert!(postgres.has_array_support());
        assert!(postgres.reserved_words().is_empty());
    }

    #[test]
    fn test_sql_type_for() {
        let field = FieldDescriptor::new("id", SemanticType::Uuid);
        assert_eq!(oracle().sql_type_for(&field).as_deref(), Some("varchar2(36)"));
    }

    #[test]
    fn test_hex() {
        assert_eq!(hex(&[]), "");
        assert_eq!(hex(&[0x0f, 0xf0]), "0ff0");
    }

    #[test]
    fn test_dialect_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Dialect>();
    }
}
