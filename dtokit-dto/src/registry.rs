//! The process-wide cache of compiled record schemas.
//!
//! Compiling a schema (parsing annotations, resolving names, building
//! validators) is a pure function of the record type, so each type is
//! compiled once and the `Arc<RecordSchema>` is shared by every instance.
//! Concurrent first use may compile the same type twice; the first schema
//! inserted wins and the other is dropped.

use crate::{Dto, RegistryConfig, Result};
use dtokit_schema::{
    RecordDescriptor, RecordManifest, RecordSchema, RecordType, SchemaError, SchemaResult,
};
use dtokit_types::{Value, normalize_class_name};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use tracing::{debug, info, warn};

/// Caches compiled record schemas by record type name.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    config: RegistryConfig,
    schemas: RwLock<HashMap<String, Arc<RecordSchema>>>,
}

/// Type names are case-insensitive.
fn cache_key(name: &str) -> String {
    normalize_class_name(name).to_ascii_lowercase()
}

impl SchemaRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry and registers every manifest the config lists.
    pub fn with_config(config: RegistryConfig) -> SchemaResult<Self> {
        let manifests = config.manifests.clone();
        let registry = Self {
            config,
            schemas: RwLock::default(),
        };
        for path in &manifests {
            registry.load_manifest(path)?;
        }
        Ok(registry)
    }

    /// A lazily created registry with the default config, for callers that
    /// have no natural place to own one.
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<SchemaRegistry> = OnceLock::new();
        GLOBAL.get_or_init(Self::new)
    }

    #[must_use]
    pub const fn config(&self) -> &RegistryConfig {
        &self.config
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read_cache().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.read_cache().contains_key(&cache_key(name))
    }

    // ================================================================
    // Registration
    // ================================================================

    /// Compiles and caches `descriptor`. If the type is already registered
    /// the existing schema is kept and returned.
    pub fn register(&self, descriptor: RecordDescriptor) -> SchemaResult<Arc<RecordSchema>> {
        let key = cache_key(descriptor.name());
        if let Some(existing) = self.cached(&key) {
            warn!(record = %descriptor.name(), "Record type already registered, keeping existing schema");
            return Ok(existing);
        }
        let schema = self.compile(&descriptor)?;
        Ok(self.insert(key, schema))
    }

    /// Registers every record in a manifest file. Returns how many records
    /// the manifest declared.
    pub fn load_manifest(&self, path: &Path) -> SchemaResult<usize> {
        self.register_manifest(RecordManifest::load(path)?)
    }

    /// Registers every record in manifest text.
    pub fn load_manifest_str(&self, text: &str) -> SchemaResult<usize> {
        self.register_manifest(RecordManifest::from_toml_str(text)?)
    }

    fn register_manifest(&self, manifest: RecordManifest) -> SchemaResult<usize> {
        let descriptors = manifest.into_descriptors()?;
        let count = descriptors.len();
        for descriptor in descriptors {
            self.register(descriptor)?;
        }
        info!(records = count, total = self.len(), "Record manifest registered");
        Ok(count)
    }

    // ================================================================
    // Lookup
    // ================================================================

    /// The schema registered under `name`.
    pub fn schema(&self, name: &str) -> SchemaResult<Arc<RecordSchema>> {
        self.cached(&cache_key(name))
            .ok_or_else(|| SchemaError::UnknownRecord(normalize_class_name(name).to_string()))
    }

    /// The schema of a static record type, compiled on first use.
    pub fn schema_for<T: RecordType>(&self) -> SchemaResult<Arc<RecordSchema>> {
        let key = cache_key(T::type_name());
        if let Some(schema) = self.cached(&key) {
            return Ok(schema);
        }
        let schema = self.compile(&T::describe())?;
        Ok(self.insert(key, schema))
    }

    // ================================================================
    // Construction
    // ================================================================

    /// Creates an instance of a static record type.
    pub fn make<T, I, K, V>(&self, parameters: I) -> Result<Dto>
    where
        T: RecordType,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        Ok(Dto::make(self.schema_for::<T>()?, parameters)?)
    }

    /// Creates an instance of a registered record type.
    pub fn make_named<I, K, V>(&self, name: &str, parameters: I) -> Result<Dto>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        Ok(Dto::make(self.schema(name)?, parameters)?)
    }

    /// Creates an instance of a registered record type from a JSON object.
    pub fn make_json(
        &self,
        name: &str,
        object: serde_json::Map<String, serde_json::Value>,
    ) -> Result<Dto> {
        Ok(Dto::make_json(self.schema(name)?, object)?)
    }

    // ================================================================
    // Cache internals
    // ================================================================

    fn compile(&self, descriptor: &RecordDescriptor) -> SchemaResult<RecordSchema> {
        let schema = RecordSchema::compile(descriptor)?;
        if self.config.validate_defaults {
            schema.check_defaults()?;
        }
        debug!(record = %schema.name(), fields = schema.len(), "Record schema compiled");
        Ok(schema)
    }

    fn read_cache(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Arc<RecordSchema>>> {
        self.schemas.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn cached(&self, key: &str) -> Option<Arc<RecordSchema>> {
        self.read_cache().get(key).cloned()
    }

    fn insert(&self, key: String, schema: RecordSchema) -> Arc<RecordSchema> {
        let mut cache = self.schemas.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(cache.entry(key).or_insert_with(|| Arc::new(schema)))
    }
}
