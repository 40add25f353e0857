//! Input loading and command bodies shared by the binary.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use oxide_dialect_core::schema::SchemaDocument;
use oxide_dialect_core::{Dialect, FieldValue, TypeDescriptor};
use serde_json::Value;

use crate::error::{CliError, Result};
use crate::values::record_values;

const STDIN: &str = "-";

/// Reads SQL text from a file, or from stdin when the path is absent or `-`.
///
/// # Errors
///
/// Returns [`CliError::Io`] if the input cannot be read.
pub fn read_sql(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new(STDIN) => read_file(path),
        _ => {
            let mut sql = String::new();
            io::stdin()
                .read_to_string(&mut sql)
                .map_err(|source| CliError::Io {
                    path: PathBuf::from(STDIN),
                    source,
                })?;
            Ok(sql)
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json(path: &Path) -> Result<Value> {
    let text = read_file(path)?;
    serde_json::from_str(&text).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a schema document.
///
/// # Errors
///
/// Returns [`CliError::MissingSchema`] without a path, or an I/O or JSON
/// error for an unreadable document.
pub fn load_schema(path: Option<&Path>) -> Result<SchemaDocument> {
    let path = path.ok_or(CliError::MissingSchema)?;
    let text = read_file(path)?;
    let schema: SchemaDocument = serde_json::from_str(&text).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), types = schema.types.len(), "Loaded schema");
    Ok(schema)
}

/// Finds a type by name.
///
/// # Errors
///
/// Returns [`CliError::UnknownType`] if the document does not declare it.
pub fn find_type<'a>(schema: &'a SchemaDocument, name: &str) -> Result<&'a TypeDescriptor> {
    schema
        .types
        .iter()
        .find(|t| t.name == name)
        .ok_or_else(|| CliError::UnknownType(String::from(name)))
}

/// Loads record values for a type from a JSON object file.
///
/// Without a path every field takes its default.
///
/// # Errors
///
/// Returns an I/O, JSON or value conversion error.
pub fn load_values(
    ty: &TypeDescriptor,
    path: Option<&Path>,
) -> Result<HashMap<String, FieldValue>> {
    match path {
        Some(path) => record_values(ty, &read_json(path)?),
        None => Ok(HashMap::new()),
    }
}

/// Describes the vendor facts of a dialect.
#[must_use]
pub fn describe(dialect: &Dialect) -> String {
    let limit = |value: Option<usize>| value.map_or_else(|| String::from("none"), |n| n.to_string());
    let profile = dialect.profile();
    let booleans = if profile.numeric_booleans() { "numeric" } else { "native" };

    let facts = [
        ("vendor", dialect.vendor().to_string()),
        ("default port", dialect.default_port().to_string()),
        ("max identifier length", limit(profile.max_identifier_length)),
        ("max inline literal", limit(dialect.max_inline_literal())),
        ("large object threshold", limit(dialect.large_object_threshold())),
        ("boolean style", String::from(booleans)),
        ("native upsert", profile.native_upsert.to_string()),
        ("array support", dialect.has_array_support().to_string()),
        ("reserved words", dialect.reserved_words().join(", ")),
    ];
    facts
        .iter()
        .map(|(name, value)| {
            let label = format!("{name}:");
            format!("{label:<24}{value}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
