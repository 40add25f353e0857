//! `create table` generation from type descriptors.

use crate::dialect::DialectProfile;
use crate::error::{DialectError, Result};
use crate::identifier::{restrict, uncamelify};
use crate::schema::{FieldDescriptor, SchemaResolver, TypeDescriptor};

/// Layout of generated scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Layout {
    compact: bool,
}

impl Layout {
    pub(crate) const fn new(compact: bool) -> Self {
        Self { compact }
    }

    /// Opens a parenthesized list.
    pub(crate) const fn open(self) -> &'static str {
        if self.compact { "(" } else { "(\n" }
    }

    /// Closes a parenthesized list.
    pub(crate) const fn close(self) -> &'static str {
        if self.compact { ")" } else { "\n)" }
    }

    /// Separates list items.
    pub(crate) const fn separator(self) -> &'static str {
        if self.compact { ", " } else { ",\n" }
    }

    /// Prefixes a list item.
    pub(crate) const fn indent(self) -> &'static str {
        if self.compact { "" } else { "\t" }
    }

    /// Separates statements of a script.
    pub(crate) const fn statement_separator(self) -> &'static str {
        if self.compact { " " } else { "\n" }
    }

    pub(crate) fn list(self, items: &[String]) -> String {
        let indented: Vec<String> = items
            .iter()
            .map(|item| format!("{}{item}", self.indent()))
            .collect();
        format!("{}{}{}", self.open(), indented.join(self.separator()), self.close())
    }
}

/// Returns the name of the sequence backing a generated column.
#[must_use]
pub fn sequence_name(table: &str, field: &FieldDescriptor) -> String {
    format!("seq_{}_{}", uncamelify(table), uncamelify(&field.name))
}

/// Builds the `create table` script for a type.
///
/// Generated fields get a `create sequence` statement ahead of the table and a
/// sequence default. Reference fields become `<name>_id` columns of the
/// vendor identifier type. Foreign keys and unique constraints follow the
/// columns. `compact` only changes whitespace.
///
/// # Errors
///
/// Returns [`DialectError::UnresolvedType`] if a foreign key targets a type
/// the resolver does not know, or [`DialectError::UnknownForeignKeyField`] if
/// the target field is not declared by that type.
pub fn build_create_table(
    ty: &TypeDescriptor,
    resolver: &dyn SchemaResolver,
    profile: &DialectProfile,
    compact: bool,
) -> Result<String> {
    let layout = Layout::new(compact);
    let table = ty.table_name();

    let mut statements = Vec::new();
    let mut columns = Vec::with_capacity(ty.fields.len());
    let mut constraints = Vec::new();

    for field in &ty.fields {
        let column = restrict(&field.column_name(), profile);
        let column_type = profile
            .column_type(field)
            .unwrap_or_else(|| String::from(profile.identifier_type));
        let mut definition = format!("{column} {column_type}");

        if field.generated {
            let sequence = sequence_name(&table, field);
            statements.push(format!("create sequence {sequence};"));
            definition.push_str(" default ");
            definition.push_str(&profile.sequence_default.render(&sequence));
        }
        if field.is_primary_key() {
            definition.push_str(" primary key");
        } else if !field.nullable || field.generated {
            definition.push_str(" not null");
        }
        columns.push(definition);

        if let Some(foreign_key) = &field.foreign_key {
            let target = resolver.resolve(&foreign_key.target_type).ok_or_else(|| {
                DialectError::UnresolvedType {
                    name: foreign_key.target_type.clone(),
                }
            })?;
            let target_field = target.field(&foreign_key.target_field).ok_or_else(|| {
                DialectError::UnknownForeignKeyField {
                    type_name: foreign_key.target_type.clone(),
                    field: foreign_key.target_field.clone(),
                }
            })?;
            constraints.push(format!(
                "foreign key ({column}) references {}({})",
                restrict(&target.table_name(), profile),
                restrict(&target_field.column_name(), profile)
            ));
        }
        if field.unique {
            let name = restrict(&format!("{}_unique", field.column_name()), profile);
            constraints.push(format!("constraint {name} unique ({column})"));
        }
    }

    tracing::debug!(
        table = %table,
        columns = columns.len(),
        sequences = statements.len(),
        constraints = constraints.len(),
        "Built create table"
    );

    columns.extend(constraints);
    statements.push(format!(
        "create table {} {};",
        restrict(&table, profile),
        layout.list(&columns)
    ));
    Ok(statements.join(layout.statement_separator()))
}
