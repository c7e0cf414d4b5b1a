//! Qualified type names and ancestry for object values.

use serde::{Deserialize, Serialize};

/// Strips a leading namespace separator so `\App\User` and `App\User`
/// compare equal.
#[must_use]
pub fn normalize_class_name(name: &str) -> &str {
    name.trim_start_matches('\\')
}

/// The type of an object value: its qualified name plus every ancestor
/// class and implemented interface it can be checked against.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassInfo {
    name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    extends: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    implements: Vec<String>,
}

impl ClassInfo {
    #[must_use]
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: normalize_class_name(name.as_ref()).to_string(),
            extends: Vec::new(),
            implements: Vec::new(),
        }
    }

    /// Adds an ancestor class. Ancestors are listed nearest first.
    #[must_use]
    pub fn extends(mut self, parent: impl AsRef<str>) -> Self {
        self.extends
            .push(normalize_class_name(parent.as_ref()).to_string());
        self
    }

    /// Adds an implemented interface.
    #[must_use]
    pub fn implements(mut self, interface: impl AsRef<str>) -> Self {
        self.implements
            .push(normalize_class_name(interface.as_ref()).to_string());
        self
    }

    /// Returns the fully qualified name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the short name (last namespace segment).
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.name.rsplit('\\').next().unwrap_or(&self.name)
    }

    /// Returns the namespace, or an empty string for global types.
    #[must_use]
    pub fn namespace(&self) -> &str {
        self.name.rsplit_once('\\').map_or("", |(ns, _)| ns)
    }

    #[must_use]
    pub fn ancestors(&self) -> &[String] {
        &self.extends
    }

    #[must_use]
    pub fn interfaces(&self) -> &[String] {
        &self.implements
    }

    /// Instance-of check: true when `type_name` is this class, one of its
    /// ancestors or one of its interfaces. Class names are case-insensitive.
    #[must_use]
    pub fn is_a(&self, type_name: &str) -> bool {
        let wanted = normalize_class_name(type_name);
        std::iter::once(&self.name)
            .chain(&self.extends)
            .chain(&self.implements)
            .any(|candidate| candidate.eq_ignore_ascii_case(wanted))
    }
}
