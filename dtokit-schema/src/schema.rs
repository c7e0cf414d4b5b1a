//! Compiled record schemas.

use crate::{FieldDeclaration, RecordDescriptor, SchemaError, SchemaResult, TypeValidator};
use dtokit_types::{ClassInfo, DtoError, DtoResult};
use std::collections::HashMap;

/// A field declaration together with its validator.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    declaration: FieldDeclaration,
    validator: TypeValidator,
}

impl FieldSchema {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.declaration.name
    }

    #[must_use]
    pub const fn declaration(&self) -> &FieldDeclaration {
        &self.declaration
    }

    #[must_use]
    pub const fn validator(&self) -> &TypeValidator {
        &self.validator
    }
}

/// The compiled, immutable schema of a record type, shared by every
/// instance of that type.
#[derive(Debug, Clone)]
pub struct RecordSchema {
    class: ClassInfo,
    fields: Vec<FieldSchema>,
    index: HashMap<String, usize>,
}

impl RecordSchema {
    /// Compiles `descriptor`, building every field's validator.
    pub fn compile(descriptor: &RecordDescriptor) -> SchemaResult<Self> {
        let record = descriptor.name();
        let mut fields = Vec::with_capacity(descriptor.fields.len());
        let mut index = HashMap::with_capacity(descriptor.fields.len());

        for declaration in &descriptor.fields {
            if index
                .insert(declaration.name.clone(), fields.len())
                .is_some()
            {
                return Err(SchemaError::DuplicateField {
                    record: record.to_string(),
                    field: declaration.name.clone(),
                });
            }
            let validator = TypeValidator::for_field(record, declaration, &descriptor.context)?;
            fields.push(FieldSchema {
                declaration: declaration.clone(),
                validator,
            });
        }

        Ok(Self {
            class: descriptor.class.clone(),
            fields,
            index,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.class.name()
    }

    #[must_use]
    pub const fn class(&self) -> &ClassInfo {
        &self.class
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Declared field names in declaration order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(FieldSchema::name)
    }

    #[must_use]
    pub fn has_property(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.index.get(name).map(|&i| &self.fields[i])
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldSchema> {
        self.fields.iter()
    }

    /// Looks up a declared field, failing with `NonexistentProperty`.
    pub fn require(&self, name: &str) -> DtoResult<&FieldSchema> {
        self.field(name)
            .ok_or_else(|| DtoError::nonexistent_property(self.name(), name))
    }

    /// Checks every declared default against its field's validator.
    pub fn check_defaults(&self) -> SchemaResult<()> {
        for field in &self.fields {
            if let Some(default) = &field.declaration.default {
                field
                    .validator
                    .validate(default)
                    .map_err(SchemaError::InvalidDefault)?;
            }
        }
        Ok(())
    }
}
