//! Error types for descriptor construction and manifest loading.

use dtokit_types::DtoError;
use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while describing or compiling a record type.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Two fields of one record share a name.
    #[error("duplicate field '{field}' in record {record}")]
    DuplicateField { record: String, field: String },

    /// A native type expression could not be parsed.
    #[error("invalid type expression '{expression}': {reason}")]
    InvalidTypeExpression { expression: String, reason: String },

    /// A supplementary annotation uses syntax that cannot be validated.
    #[error("unsupported annotation on {record}::${field}: {reason}")]
    UnsupportedAnnotation {
        record: String,
        field: String,
        reason: String,
    },

    /// A declared default does not satisfy its own field type.
    #[error("invalid default: {0}")]
    InvalidDefault(#[source] DtoError),

    /// No descriptor is registered under this name.
    #[error("unknown record type: {0}")]
    UnknownRecord(String),

    /// IO error (manifest or config file).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error.
    #[error("manifest parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
