//! Record descriptors and type validation for dtokit.
//!
//! A record type is described by a [`RecordDescriptor`]: its [`ClassInfo`],
//! the [`ResolutionContext`] its annotations are written in, and an ordered
//! list of [`FieldDeclaration`]s. Compiling a descriptor yields a
//! [`RecordSchema`] holding one [`TypeValidator`] per field; the validator's
//! allowed type set is computed once and reused on every write.
//!
//! Descriptors come from the builder API, from [`RecordType`] impls, or from
//! a TOML [`RecordManifest`].
//!
//! [`ClassInfo`]: dtokit_types::ClassInfo

mod annotation;
mod context;
mod descriptor;
mod error;
mod field;
mod manifest;
mod native;
mod schema;
mod validator;

pub use annotation::parse_annotation;
pub use context::ResolutionContext;
pub use descriptor::{RecordDescriptor, RecordDescriptorBuilder, RecordType};
pub use error::{SchemaError, SchemaResult};
pub use field::FieldDeclaration;
pub use manifest::{ManifestField, ManifestRecord, RecordManifest};
pub use native::NativeType;
pub use schema::{FieldSchema, RecordSchema};
pub use validator::TypeValidator;
