//! Record instances.

use dtokit_schema::RecordSchema;
use dtokit_types::{ClassInfo, DtoError, DtoResult, HostObject, Map, Value};
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// An instance of a record type.
///
/// Only fields that have been explicitly assigned are stored: a field is
/// either unset, set to null, or set to a value. Every key in the store is
/// a declared property and every stored value passed its field's validator
/// when it was written.
///
/// The `only` and `except` filters shape [`Dto::to_array`] without touching
/// the stored data.
#[derive(Clone)]
pub struct Dto {
    schema: Arc<RecordSchema>,
    data: Map,
    /// Allow-list; `None` disables it.
    only: Option<Vec<String>>,
    except: Vec<String>,
}

impl Dto {
    /// An instance with every declared field unset. Declared defaults are
    /// not applied.
    #[must_use]
    pub fn new(schema: Arc<RecordSchema>) -> Self {
        Self {
            schema,
            data: Map::new(),
            only: None,
            except: Vec::new(),
        }
    }

    /// Creates an instance and assigns `parameters` in iteration order.
    /// Construction fails with the first failing assignment.
    pub fn make<I, K, V>(schema: Arc<RecordSchema>, parameters: I) -> DtoResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut dto = Self::new(schema);
        dto.set_many(parameters)?;
        Ok(dto)
    }

    /// Creates an instance from a JSON object.
    pub fn make_json(
        schema: Arc<RecordSchema>,
        object: serde_json::Map<String, serde_json::Value>,
    ) -> DtoResult<Self> {
        Self::make(schema, object.into_iter().map(|(k, v)| (k, Value::from(v))))
    }

    #[must_use]
    pub const fn schema(&self) -> &Arc<RecordSchema> {
        &self.schema
    }

    #[must_use]
    pub fn record_name(&self) -> &str {
        self.schema.name()
    }

    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.schema.property_names()
    }

    #[must_use]
    pub fn has_property(&self, name: &str) -> bool {
        self.schema.has_property(name)
    }

    /// Whether `name` currently holds a value (possibly null).
    #[must_use]
    pub fn is_set(&self, name: &str) -> bool {
        self.data.contains_key(name)
    }

    // ================================================================
    // Writes
    // ================================================================

    /// Assigns one field. Fails with `NonexistentProperty` for undeclared
    /// names and with `InvalidType` when the field's validator rejects the
    /// value; the stored value is untouched on failure.
    pub fn assign(&mut self, name: &str, value: impl Into<Value>) -> DtoResult<()> {
        let field = self.schema.require(name)?;
        let value = value.into();
        field.validator().validate(&value)?;
        self.data.insert(name, value);
        Ok(())
    }

    /// Chainable single-field assignment.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> DtoResult<&mut Self> {
        self.assign(name, value)?;
        Ok(self)
    }

    /// Assigns every pair in order. Stops at the first failure; pairs
    /// already applied stay applied.
    pub fn set_many<I, K, V>(&mut self, values: I) -> DtoResult<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        for (name, value) in values {
            self.assign(name.as_ref(), value)?;
        }
        Ok(self)
    }

    /// Unsets each named field. Undeclared names fail; unsetting a field
    /// that is not set is a no-op.
    pub fn unset<I>(&mut self, names: I) -> DtoResult<&mut Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref();
            self.schema.require(name)?;
            self.data.remove(name);
        }
        Ok(self)
    }

    /// Removes a field's value if present, without checking that the name
    /// is declared.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.data.remove(name)
    }

    // ================================================================
    // Reads
    // ================================================================

    /// Reads a field. Fails with `NonexistentProperty` for undeclared names
    /// and `PropertyNotInitialized` for declared fields that are unset.
    pub fn read(&self, name: &str) -> DtoResult<&Value> {
        self.schema.require(name)?;
        self.data
            .get(name)
            .ok_or_else(|| DtoError::not_initialized(self.record_name(), name))
    }

    /// Same as [`Dto::read`].
    pub fn get(&self, name: &str) -> DtoResult<&Value> {
        self.read(name)
    }

    /// Reads a field, returning `default` when it is declared but unset.
    pub fn get_or(&self, name: &str, default: impl Into<Value>) -> DtoResult<Value> {
        self.schema.require(name)?;
        Ok(self
            .data
            .get(name)
            .cloned()
            .unwrap_or_else(|| default.into()))
    }

    // ================================================================
    // Projection
    // ================================================================

    /// Restricts projection to `names`. An empty list disables the filter.
    pub fn only<I>(&mut self, names: I) -> DtoResult<&mut Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let names = self.declared(names)?;
        self.only = (!names.is_empty()).then_some(names);
        Ok(self)
    }

    /// Excludes `names` from projection, overriding `only`.
    pub fn except<I>(&mut self, names: I) -> DtoResult<&mut Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.except = self.declared(names)?;
        Ok(self)
    }

    /// Restricts projection to the fields currently set to a non-null
    /// value. `except` is left as is.
    pub fn compact(&mut self) -> &mut Self {
        let present = self
            .data
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(name, _)| name.to_string())
            .collect();
        self.only = Some(present);
        self
    }

    /// Projects the record to a plain map: set fields, narrowed by `only`
    /// (in `only` order) and then by `except`. Nested records are projected
    /// recursively.
    #[must_use]
    pub fn to_array(&self) -> Map {
        let candidates: Vec<&str> = match &self.only {
            Some(only) => only
                .iter()
                .map(String::as_str)
                .filter(|name| self.data.contains_key(name))
                .collect(),
            None => self.data.keys().collect(),
        };
        candidates
            .into_iter()
            .filter(|name| !self.except.iter().any(|excluded| excluded == name))
            .filter_map(|name| self.data.get(name).map(|value| (name, project(value))))
            .collect()
    }

    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        self.to_array().to_json()
    }

    /// Wraps the record as a value so it can be nested in another record.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::object(self)
    }

    fn declared<I>(&self, names: I) -> DtoResult<Vec<String>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut declared: Vec<String> = Vec::new();
        for name in names {
            let name = name.as_ref();
            self.schema.require(name)?;
            if !declared.iter().any(|d| d == name) {
                declared.push(name.to_string());
            }
        }
        Ok(declared)
    }
}

fn project(value: &Value) -> Value {
    match value {
        Value::Object(object) => object.flatten().map_or_else(|| value.clone(), Value::Map),
        other => other.clone(),
    }
}

impl HostObject for Dto {
    fn class_info(&self) -> &ClassInfo {
        self.schema.class()
    }

    fn to_json(&self) -> serde_json::Value {
        Self::to_json(self)
    }

    fn flatten(&self) -> Option<Map> {
        Some(self.to_array())
    }
}

impl From<Dto> for Value {
    fn from(dto: Dto) -> Self {
        dto.into_value()
    }
}

impl Serialize for Dto {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_array().serialize(serializer)
    }
}

impl fmt::Debug for Dto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dto")
            .field("record", &self.record_name())
            .field("data", &self.data)
            .field("only", &self.only)
            .field("except", &self.except)
            .finish()
    }
}
