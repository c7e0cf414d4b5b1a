//! Error types for record access and validation.
//!
//! Message wording is matched on by consumers and must stay stable.

use crate::TypeName;
use thiserror::Error;

/// Result type for record operations.
pub type DtoResult<T> = Result<T, DtoError>;

/// Errors raised while reading, writing or projecting a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DtoError {
    /// The property is not declared on the record type.
    #[error("Public property ${property} does not exist in class {record}.")]
    NonexistentProperty { record: String, property: String },

    /// The property is declared but has never been assigned.
    #[error("{record}::${property} must not be accessed before initialization.")]
    PropertyNotInitialized { record: String, property: String },

    /// The value does not match the single declared type.
    #[error("{record}::${property} must be of type {allowed}, received a value of type {actual}.")]
    InvalidType {
        record: String,
        property: String,
        allowed: String,
        actual: String,
    },

    /// The value matches none of the declared alternatives.
    #[error(
        "{record}::${property} must be one of these types: {joined}; received a value of type {actual}.",
        joined = .allowed.join(", ")
    )]
    InvalidUnionType {
        record: String,
        property: String,
        allowed: Vec<String>,
        actual: String,
    },
}

impl DtoError {
    pub fn nonexistent_property(record: impl Into<String>, property: impl Into<String>) -> Self {
        Self::NonexistentProperty {
            record: record.into(),
            property: property.into(),
        }
    }

    pub fn not_initialized(record: impl Into<String>, property: impl Into<String>) -> Self {
        Self::PropertyNotInitialized {
            record: record.into(),
            property: property.into(),
        }
    }

    /// Builds a type mismatch error, picking the single or union phrasing
    /// from the number of allowed types.
    pub fn invalid_type(
        record: impl Into<String>,
        property: impl Into<String>,
        actual: impl Into<String>,
        allowed: &[TypeName],
    ) -> Self {
        let record = record.into();
        let property = property.into();
        let actual = actual.into();
        match allowed {
            [single] => Self::InvalidType {
                record,
                property,
                allowed: single.to_string(),
                actual,
            },
            many => Self::InvalidUnionType {
                record,
                property,
                allowed: many.iter().map(ToString::to_string).collect(),
                actual,
            },
        }
    }

    /// The record type the error was raised on.
    #[must_use]
    pub fn record(&self) -> &str {
        match self {
            Self::NonexistentProperty { record, .. }
            | Self::PropertyNotInitialized { record, .. }
            | Self::InvalidType { record, .. }
            | Self::InvalidUnionType { record, .. } => record,
        }
    }

    /// The property the error was raised on.
    #[must_use]
    pub fn property(&self) -> &str {
        match self {
            Self::NonexistentProperty { property, .. }
            | Self::PropertyNotInitialized { property, .. }
            | Self::InvalidType { property, .. }
            | Self::InvalidUnionType { property, .. } => property,
        }
    }

    /// Whether this is a type mismatch (either phrasing).
    #[must_use]
    pub const fn is_invalid_type(&self) -> bool {
        matches!(self, Self::InvalidType { .. } | Self::InvalidUnionType { .. })
    }
}
