//! Error types for dialect translation.

/// Errors raised while translating or generating SQL.
///
/// All variants are deterministic functions of the input; none is transient.
#[derive(Debug, thiserror::Error)]
pub enum DialectError {
    /// The upsert grammar was not matched at the given token offset.
    #[error("Malformed upsert at token {offset}: {message}")]
    MalformedUpsert {
        /// Index of the offending token in the token stream.
        offset: usize,
        /// What was expected at that position.
        message: String,
    },

    /// An `on conflict` column is absent from the insert column list.
    #[error("Conflict column '{column}' (token {offset}) is not in the inserted column list")]
    UnknownConflictColumn {
        /// The conflict column as written.
        column: String,
        /// Index of the conflict column token.
        offset: usize,
    },

    /// Array binding was requested for a field with no vendor SQL type name.
    #[error("Could not determine the SQL type name of array field '{field}'")]
    UnresolvableArrayType {
        /// The field name.
        field: String,
    },

    /// Streaming a value into a vendor large-object handle failed.
    #[error("Can not write large object stream for field '{field}': {source}")]
    LargeObjectWrite {
        /// The field being streamed.
        field: String,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The schema resolver does not know the referenced type.
    #[error("Unresolved type reference '{name}'")]
    UnresolvedType {
        /// The referenced type name.
        name: String,
    },

    /// A foreign key targets a field the referenced type does not declare.
    #[error("Type '{type_name}' has no field '{field}' to reference")]
    UnknownForeignKeyField {
        /// The referenced type name.
        type_name: String,
        /// The missing target field.
        field: String,
    },

    /// The upsert gate pattern failed to compile.
    #[error("Invalid upsert gate pattern: {0}")]
    Gate(#[from] regex::Error),

    /// A vendor name could not be parsed.
    #[error("Unknown database vendor '{0}'")]
    UnknownVendor(String),
}

impl DialectError {
    /// Creates a malformed-upsert error at a token offset.
    #[must_use]
    pub fn malformed(offset: usize, message: impl Into<String>) -> Self {
        Self::MalformedUpsert {
            offset,
            message: message.into(),
        }
    }

    /// Returns the token offset for parse failures.
    #[must_use]
    pub const fn token_offset(&self) -> Option<usize> {
        match self {
            Self::MalformedUpsert { offset, .. } | Self::UnknownConflictColumn { offset, .. } => {
                Some(*offset)
            }
            _ => None,
        }
    }
}

/// Result type for dialect operations.
pub type Result<T> = std::result::Result<T, DialectError>;
