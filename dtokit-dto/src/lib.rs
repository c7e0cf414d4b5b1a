//! Validated data transfer objects for dtokit.
//!
//! A [`Dto`] is a record instance: a store of values for the fields its
//! [`RecordSchema`] declares. Every write goes through the field's
//! [`TypeValidator`]; reads distinguish "never set" from "set to null";
//! [`Dto::to_array`] projects the record to a plain [`Map`], honouring the
//! `only`/`except` view filters and flattening nested records.
//!
//! Schemas are compiled once per record type and cached in a
//! [`SchemaRegistry`]:
//!
//! ```
//! use dtokit_dto::SchemaRegistry;
//! use dtokit_schema::{FieldDeclaration, RecordDescriptor};
//! use dtokit_types::Value;
//!
//! let registry = SchemaRegistry::new();
//! registry
//!     .register(
//!         RecordDescriptor::builder("App\\Dto\\Person")
//!             .field(FieldDeclaration::string("name"))
//!             .field(FieldDeclaration::optional("age", "int"))
//!             .build(),
//!     )
//!     .unwrap();
//!
//! let mut person = registry.make_named("App\\Dto\\Person", [("name", "Alice")]).unwrap();
//! person.set("age", Value::Null).unwrap().compact();
//! assert_eq!(person.to_json(), serde_json::json!({"name": "Alice"}));
//! ```
//!
//! [`TypeValidator`]: dtokit_schema::TypeValidator
//! [`Map`]: dtokit_types::Map

mod config;
mod dto;
mod error;
mod registry;

pub use config::RegistryConfig;
pub use dto::Dto;
pub use error::{Error, Result};
pub use registry::SchemaRegistry;

pub use dtokit_schema::{RecordDescriptor, RecordSchema, RecordType};
pub use dtokit_types::{DtoError, DtoResult, Map, Value};
