//! Error type for registry-driven construction, which can fail either while
//! compiling a record type's schema or while applying parameters.

use dtokit_schema::SchemaError;
use dtokit_types::DtoError;
use thiserror::Error;

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A record access or validation failure.
    #[error(transparent)]
    Dto(#[from] DtoError),

    /// The record type could not be described or compiled.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl Error {
    /// The record-level error, if this is one.
    #[must_use]
    pub const fn as_dto(&self) -> Option<&DtoError> {
        match self {
            Self::Dto(err) => Some(err),
            Self::Schema(_) => None,
        }
    }
}
