//! TOML record manifests: declarative descriptors for record types that
//! are not known at compile time.
//!
//! ```toml
//! [[record]]
//! name = 'App\Dto\Person'
//! extends = ['App\Dto\Base']
//!
//! [record.imports]
//! Carbon = 'Carbon\CarbonImmutable'
//!
//! [[record.field]]
//! name = "age"
//! type = "?int"
//!
//! [[record.field]]
//! name = "born"
//! doc = "@var Carbon|null"
//! ```

use crate::{FieldDeclaration, NativeType, RecordDescriptor, SchemaResult};
use dtokit_types::{Map, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// A parsed manifest file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordManifest {
    #[serde(default, rename = "record")]
    pub records: Vec<ManifestRecord>,
}

/// One `[[record]]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestRecord {
    pub name: String,
    /// Defaults to the namespace of `name`.
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub extends: Vec<String>,
    #[serde(default)]
    pub implements: Vec<String>,
    #[serde(default)]
    pub imports: BTreeMap<String, String>,
    #[serde(default, rename = "field")]
    pub fields: Vec<ManifestField>,
}

/// One `[[record.field]]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestField {
    pub name: String,
    /// Native type expression: `int`, `?int`, `int|string|null`.
    #[serde(default, rename = "type")]
    pub native_type: Option<String>,
    /// Supplementary annotation text.
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub default: Option<toml::Value>,
}

impl RecordManifest {
    pub fn from_toml_str(text: &str) -> SchemaResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a manifest file.
    pub fn load(path: &Path) -> SchemaResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let manifest = Self::from_toml_str(&text)?;
        info!(
            path = %path.display(),
            records = manifest.records.len(),
            "Record manifest loaded"
        );
        Ok(manifest)
    }

    /// Converts every record table into a descriptor. Class names in
    /// native types, `extends` and `implements` resolve against the
    /// record's namespace and imports.
    pub fn into_descriptors(self) -> SchemaResult<Vec<RecordDescriptor>> {
        self.records
            .into_iter()
            .map(ManifestRecord::into_descriptor)
            .collect()
    }
}

impl ManifestRecord {
    pub fn into_descriptor(self) -> SchemaResult<RecordDescriptor> {
        let mut builder = RecordDescriptor::builder(&self.name);
        if let Some(namespace) = &self.namespace {
            builder = builder.namespace(namespace);
        }
        for (alias, target) in &self.imports {
            builder = builder.import(alias, target);
        }
        let context = builder.clone().build().context;

        for parent in &self.extends {
            builder = builder.extends(context.resolve(parent));
        }
        for interface in &self.implements {
            builder = builder.implements(context.resolve(interface));
        }
        for field in self.fields {
            let mut declaration = FieldDeclaration::new(field.name);
            if let Some(expression) = &field.native_type {
                declaration = declaration.native(NativeType::parse(expression)?.resolved(&context));
            }
            if let Some(doc) = field.doc {
                declaration = declaration.annotation(doc);
            }
            if let Some(default) = field.default {
                declaration = declaration.default_value(from_toml(default));
            }
            builder = builder.field(declaration);
        }
        Ok(builder.build())
    }
}

fn from_toml(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Int(i),
        toml::Value::Float(f) => Value::Float(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::List(items.into_iter().map(from_toml).collect()),
        toml::Value::Table(table) => Value::Map(
            table
                .into_iter()
                .map(|(k, v)| (k, from_toml(v)))
                .collect::<Map>(),
        ),
    }
}
