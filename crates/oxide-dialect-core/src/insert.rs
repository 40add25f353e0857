//! Literal `insert` generation from type descriptors and values.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::ddl::Layout;
use crate::dialect::DialectProfile;
use crate::identifier::restrict;
use crate::literal::{default_for_missing, literal_for};
use crate::schema::{SemanticType, TypeDescriptor};
use crate::value::FieldValue;

/// Builds a fully literal `insert` for one record, using the current instant
/// for missing mandatory date/time values.
#[must_use]
pub fn build_insert_literal(
    ty: &TypeDescriptor,
    values: &HashMap<String, FieldValue>,
    profile: &DialectProfile,
    compact: bool,
) -> String {
    build_insert_literal_at(ty, values, profile, compact, Utc::now())
}

/// Builds a fully literal `insert` for one record.
///
/// Fields are emitted in declaration order. Missing or null values are
/// replaced by [`default_for_missing`], with `now` shared by every date/time
/// field. Reference fields without a value are skipped, as are generated
/// fields without a value (their sequence default applies).
#[must_use]
pub fn build_insert_literal_at(
    ty: &TypeDescriptor,
    values: &HashMap<String, FieldValue>,
    profile: &DialectProfile,
    compact: bool,
    now: DateTime<Utc>,
) -> String {
    let layout = Layout::new(compact);
    let mut columns = Vec::with_capacity(ty.fields.len());
    let mut literals = Vec::with_capacity(ty.fields.len());

    for field in &ty.fields {
        let supplied = values.get(&field.name).filter(|v| !v.is_null());
        let value = match supplied {
            Some(value) => value.clone(),
            None if field.semantic_type == SemanticType::Reference || field.generated => {
                tracing::trace!(field = %field.name, "Skipping field without value");
                continue;
            }
            None => default_for_missing(field, now),
        };
        columns.push(restrict(&field.column_name(), profile));
        literals.push(literal_for(field, &value, profile));
    }

    let table = restrict(&ty.table_name(), profile);
    tracing::debug!(table = %table, columns = columns.len(), "Built literal insert");
    format!(
        "insert into {table} {} values {};",
        layout.list(&columns),
        layout.list(&literals)
    )
}
