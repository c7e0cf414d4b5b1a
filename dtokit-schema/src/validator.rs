//! Per-field type validation.

use crate::context::is_self_reference;
use crate::{FieldDeclaration, NativeType, ResolutionContext, SchemaError, SchemaResult, parse_annotation};
use dtokit_types::{DtoError, DtoResult, TypeName, Value};

/// The allowed type set of one field, computed once from the field's
/// declaration and checked on every write.
///
/// An empty set means the field was declared without usable type
/// information and accepts anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeValidator {
    record: String,
    field: String,
    allowed: Vec<TypeName>,
}

impl TypeValidator {
    /// Builds the validator for `field` of `record`.
    ///
    /// Native type names come first, then names from the supplementary
    /// annotation resolved against `context`; duplicates keep their first
    /// position. `self` and `static` name `record` in either.
    pub fn for_field(
        record: &str,
        field: &FieldDeclaration,
        context: &ResolutionContext,
    ) -> SchemaResult<Self> {
        let mut allowed: Vec<TypeName> = field
            .native_type
            .as_ref()
            .map(NativeType::type_names)
            .unwrap_or_default()
            .into_iter()
            .map(|name| {
                if is_self_reference(name.as_str()) {
                    TypeName::class(record)
                } else {
                    name
                }
            })
            .collect();

        if let Some(text) = &field.annotation {
            let names = parse_annotation(text, record, context).map_err(|reason| {
                SchemaError::UnsupportedAnnotation {
                    record: record.to_string(),
                    field: field.name.clone(),
                    reason,
                }
            })?;
            allowed.extend(names);
        }

        Ok(Self::new(record, &field.name, allowed))
    }

    /// Builds a validator from an explicit type list.
    #[must_use]
    pub fn new(
        record: impl Into<String>,
        field: impl Into<String>,
        allowed: impl IntoIterator<Item = TypeName>,
    ) -> Self {
        let mut unique: Vec<TypeName> = Vec::new();
        for name in allowed {
            if !unique.contains(&name) {
                unique.push(name);
            }
        }
        Self {
            record: record.into(),
            field: field.into(),
            allowed: unique,
        }
    }

    #[must_use]
    pub fn allowed_types(&self) -> &[TypeName] {
        &self.allowed
    }

    /// True when the field accepts any value.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.allowed.is_empty()
    }

    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        self.allowed.is_empty() || self.allowed.iter().any(|t| t.accepts(value))
    }

    pub fn validate(&self, value: &Value) -> DtoResult<()> {
        if self.accepts(value) {
            Ok(())
        } else {
            Err(DtoError::invalid_type(
                &self.record,
                &self.field,
                value.type_name(),
                &self.allowed,
            ))
        }
    }
}
