//! Error types for the command-line front end.

use std::path::PathBuf;

use oxide_dialect_core::DialectError;

/// Errors raised while loading inputs or running a command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Translation or generation failed.
    #[error(transparent)]
    Dialect(#[from] DialectError),

    /// Reading an input file or stdin failed.
    #[error("Can not read '{path}': {source}")]
    Io {
        /// The input path (`-` for stdin).
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A JSON input could not be parsed.
    #[error("Invalid JSON in '{path}': {source}")]
    Json {
        /// The input path.
        path: PathBuf,
        /// The underlying parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// The command needs a schema document and none was given.
    #[error("No schema document given (use --schema or OXIDE_DIALECT_SCHEMA)")]
    MissingSchema,

    /// The schema document has no such type.
    #[error("Type '{0}' is not defined in the schema document")]
    UnknownType(String),

    /// The values document is not a JSON object.
    #[error("Values must be a JSON object keyed by field name")]
    ValuesNotObject,

    /// A JSON value does not fit the field's semantic type.
    #[error("Field '{field}' expects {expected}")]
    InvalidValue {
        /// The field name.
        field: String,
        /// Description of the accepted JSON shape.
        expected: &'static str,
    },
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
