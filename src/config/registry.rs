//! Registry configuration: which backend stores contexts, and where.

use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistryBackend {
    /// One TOML file per context under the config directory
    #[default]
    File,
    /// Embedded sled database under the data directory
    Sled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub backend: RegistryBackend,

    /// Overrides the backend's default location
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Built-in names that cannot be created
    #[serde(default = "default_reserved_names")]
    pub reserved_names: Vec<String>,
}

fn default_reserved_names() -> Vec<String> {
    vec!["default".to_string()]
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            backend: RegistryBackend::default(),
            path: None,
            reserved_names: default_reserved_names(),
        }
    }
}

impl RegistryConfig {
    pub fn resolve_path(&self) -> Result<PathBuf, StorageError> {
        match (&self.path, self.backend) {
            (Some(path), _) => Ok(path.clone()),
            (None, RegistryBackend::File) => super::paths::contexts_dir(),
            (None, RegistryBackend::Sled) => super::paths::contexts_db_dir(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Some(path) = &self.path {
            if path.as_os_str().is_empty() {
                return Err("Registry path cannot be empty".to_string());
            }
        }
        if let Some(blank) = self.reserved_names.iter().find(|n| n.trim().is_empty()) {
            return Err(format!("Reserved name {:?} is blank", blank));
        }
        Ok(())
    }
}
