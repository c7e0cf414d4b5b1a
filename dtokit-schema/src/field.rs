use crate::NativeType;
use dtokit_types::Value;

/// A declared field of a record type.
///
/// `native_type` is the field's own type declaration; `annotation` is the
/// raw text of a supplementary `@var` annotation that broadens it or stands
/// in when no native type is declared. A field with neither accepts any
/// value.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDeclaration {
    pub name: String,
    pub native_type: Option<NativeType>,
    pub annotation: Option<String>,
    /// Declared default. Records start with every field unset, so this is
    /// informational only and never applied on construction.
    pub default: Option<Value>,
}

impl FieldDeclaration {
    /// An untyped field.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            native_type: None,
            annotation: None,
            default: None,
        }
    }

    fn typed(name: impl Into<String>, native_type: NativeType) -> Self {
        Self::new(name).native(native_type)
    }

    /// Shorthand for a `string` field.
    #[must_use]
    pub fn string(name: impl Into<String>) -> Self {
        Self::typed(name, NativeType::named("string"))
    }

    /// Shorthand for an `int` field.
    #[must_use]
    pub fn int(name: impl Into<String>) -> Self {
        Self::typed(name, NativeType::named("int"))
    }

    /// Shorthand for a `float` field.
    #[must_use]
    pub fn float(name: impl Into<String>) -> Self {
        Self::typed(name, NativeType::named("float"))
    }

    /// Shorthand for a `bool` field.
    #[must_use]
    pub fn bool(name: impl Into<String>) -> Self {
        Self::typed(name, NativeType::named("bool"))
    }

    /// Shorthand for an `array` field. Elements are not checked.
    #[must_use]
    pub fn array(name: impl Into<String>) -> Self {
        Self::typed(name, NativeType::named("array"))
    }

    /// Shorthand for a field holding an instance of `class`.
    #[must_use]
    pub fn object(name: impl Into<String>, class: impl Into<String>) -> Self {
        Self::typed(name, NativeType::named(class))
    }

    /// Shorthand for a nullable `?type_name` field.
    #[must_use]
    pub fn optional(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::typed(name, NativeType::nullable(type_name))
    }

    #[must_use]
    pub fn native(mut self, native_type: NativeType) -> Self {
        self.native_type = Some(native_type);
        self
    }

    /// Makes the native type nullable. No-op for untyped fields.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.native_type = match self.native_type {
            Some(NativeType::Named { name, .. }) => Some(NativeType::Named {
                name,
                nullable: true,
            }),
            Some(NativeType::Union(mut members)) => {
                if !members.iter().any(NativeType::allows_null) {
                    members.push(NativeType::nullable("null"));
                }
                Some(NativeType::Union(members))
            }
            None => None,
        };
        self
    }

    #[must_use]
    pub fn union<I, S>(self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.native(NativeType::union(members))
    }

    #[must_use]
    pub fn annotation(mut self, text: impl Into<String>) -> Self {
        self.annotation = Some(text.into());
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }
}
