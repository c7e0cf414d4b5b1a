//! Declared type names and how runtime values satisfy them.
//!
//! A field's allowed set is a list of [`TypeName`]s. A value satisfies a
//! name when the names match exactly, when the name is an alias of the
//! value's runtime type (`int` for `integer`), or when the value is an
//! instance of the named class, ancestor, interface or pseudo-type.

use crate::{Value, normalize_class_name};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Alias spellings and the runtime type name they stand for.
const ALIASES: &[(&str, &str)] = &[
    ("int", Value::INTEGER),
    ("bool", Value::BOOLEAN),
    ("float", Value::DOUBLE),
];

/// Names that are never resolved against a namespace.
const BUILTINS: &[&str] = &[
    "null", "bool", "boolean", "int", "integer", "float", "double", "string", "array",
    "object", "mixed", "iterable", "callable", "resource", "void", "never", "true", "false",
];

/// One acceptable type for a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    /// Builtin names are lower-cased; class names lose a leading `\`.
    ///
    /// Only a bare, unqualified name can be a builtin, so a global class
    /// spelled like a keyword must be written qualified (`\Resource`).
    #[must_use]
    pub fn new(name: impl AsRef<str>) -> Self {
        let name = name.as_ref().trim();
        if !name.contains('\\') && Self::is_builtin(name) {
            Self(name.to_ascii_lowercase())
        } else {
            Self::class(name)
        }
    }

    /// A class name, never taken for a builtin.
    #[must_use]
    pub fn class(name: impl AsRef<str>) -> Self {
        Self(normalize_class_name(name.as_ref().trim()).to_string())
    }

    #[must_use]
    pub fn null() -> Self {
        Self(Value::NULL.to_string())
    }

    /// Whether `name` is a builtin keyword rather than a class name.
    #[must_use]
    pub fn is_builtin(name: &str) -> bool {
        BUILTINS.iter().any(|b| b.eq_ignore_ascii_case(name))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == Value::NULL
    }

    /// The runtime type name this name stands for after alias resolution.
    #[must_use]
    pub fn canonical(&self) -> &str {
        ALIASES
            .iter()
            .find_map(|(alias, canonical)| (*alias == self.0).then_some(*canonical))
            .unwrap_or(self.0.as_str())
    }

    /// Whether `value` satisfies this type.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        let actual = value.type_name();
        if self.0 == actual || self.canonical() == actual {
            return true;
        }
        match self.0.as_str() {
            "mixed" => true,
            "object" => value.as_object().is_some(),
            "iterable" => value.is_array(),
            "true" => value.as_bool() == Some(true),
            "false" => value.as_bool() == Some(false),
            // builtins are stored lower-cased; anything else is a class
            name if BUILTINS.contains(&name) => false,
            class => value
                .as_object()
                .is_some_and(|object| object.class_info().is_a(class)),
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TypeName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}
