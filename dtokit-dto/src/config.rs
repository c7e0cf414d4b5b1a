//! Registry configuration, read from TOML.
//!
//! ```toml
//! validate_defaults = true
//! manifests = ["records/people.toml", "records/orders.toml"]
//! ```

use dtokit_schema::SchemaResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for a [`SchemaRegistry`](crate::SchemaRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Reject record types whose declared defaults fail their own field
    /// type when the schema is compiled.
    #[serde(default = "default_validate_defaults")]
    pub validate_defaults: bool,
    /// Record manifests registered when the registry is created.
    #[serde(default)]
    pub manifests: Vec<PathBuf>,
}

fn default_validate_defaults() -> bool {
    true
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            validate_defaults: default_validate_defaults(),
            manifests: Vec::new(),
        }
    }
}

impl RegistryConfig {
    pub fn from_toml_str(text: &str) -> SchemaResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads a config file. Relative manifest paths are taken relative to
    /// the file's directory.
    pub fn load(path: &Path) -> SchemaResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&text)?;
        if let Some(base) = path.parent() {
            for manifest in &mut config.manifests {
                if manifest.is_relative() {
                    *manifest = base.join(&*manifest);
                }
            }
        }
        Ok(config)
    }
}
