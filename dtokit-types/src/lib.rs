//! Core type definitions for dtokit.
//!
//! This crate defines the building blocks every other dtokit crate depends on:
//! - [`Value`] and [`Map`]: the untyped runtime values a record stores
//! - [`ClassInfo`] and [`HostObject`]: object values and their type ancestry
//! - [`TypeName`]: one acceptable type in a field's allowed set, with alias
//!   resolution and instance-of matching
//! - [`DtoError`]: the single error surface for record access and validation
//!
//! Records themselves live in `dtokit-dto`; descriptors and validators in
//! `dtokit-schema`.

mod class;
mod error;
mod json;
mod type_name;
mod value;

pub use class::{ClassInfo, normalize_class_name};
pub use error::{DtoError, DtoResult};
pub use type_name::TypeName;
pub use value::{HostObject, Map, Value};
