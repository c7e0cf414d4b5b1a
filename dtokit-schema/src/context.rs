//! Name resolution for relative type names in annotations.

use dtokit_types::{TypeName, normalize_class_name};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The namespace a record is declared in, plus its import aliases.
///
/// Resolution follows the usual rules:
/// - a leading `\` marks an already fully qualified name
/// - a first segment matching an import alias (case-insensitive) is
///   replaced by the imported name
/// - anything else is relative to the namespace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionContext {
    #[serde(default)]
    namespace: String,
    #[serde(default)]
    imports: BTreeMap<String, String>,
}

impl ResolutionContext {
    #[must_use]
    pub fn new(namespace: impl AsRef<str>) -> Self {
        Self {
            namespace: normalize_class_name(namespace.as_ref())
                .trim_end_matches('\\')
                .to_string(),
            imports: BTreeMap::new(),
        }
    }

    /// Adds an import. `alias` defaults to the last segment of `target`
    /// when empty.
    #[must_use]
    pub fn with_import(mut self, alias: impl AsRef<str>, target: impl AsRef<str>) -> Self {
        self.add_import(alias, target);
        self
    }

    pub fn add_import(&mut self, alias: impl AsRef<str>, target: impl AsRef<str>) {
        let target = normalize_class_name(target.as_ref()).to_string();
        let alias = match alias.as_ref() {
            "" => target.rsplit('\\').next().unwrap_or(&target).to_string(),
            alias => alias.to_string(),
        };
        self.imports.insert(alias, target);
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[must_use]
    pub fn imports(&self) -> &BTreeMap<String, String> {
        &self.imports
    }

    fn import(&self, alias: &str) -> Option<&str> {
        self.imports
            .iter()
            .find(|(a, _)| a.eq_ignore_ascii_case(alias))
            .map(|(_, target)| target.as_str())
    }

    /// Resolves a class name to its fully qualified form, without a leading
    /// separator. Builtin names and `self`/`static`/`$this` are returned
    /// unchanged.
    #[must_use]
    pub fn resolve(&self, name: &str) -> String {
        let name = name.trim();
        if let Some(qualified) = name.strip_prefix('\\') {
            return qualified.to_string();
        }
        if TypeName::is_builtin(name) || is_self_reference(name) {
            return name.to_string();
        }
        let (head, rest) = match name.split_once('\\') {
            Some((head, rest)) => (head, Some(rest)),
            None => (name, None),
        };
        if let Some(target) = self.import(head) {
            return match rest {
                Some(rest) => format!("{target}\\{rest}"),
                None => target.to_string(),
            };
        }
        if self.namespace.is_empty() {
            name.to_string()
        } else {
            format!("{}\\{name}", self.namespace)
        }
    }
}

/// `self`, `static` or `$this`: names that stand for the declaring type.
pub(crate) fn is_self_reference(name: &str) -> bool {
    ["self", "static", "$this"]
        .iter()
        .any(|keyword| keyword.eq_ignore_ascii_case(name))
}
