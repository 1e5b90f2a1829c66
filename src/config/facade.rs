//! Config loader facade: builds the layered `config` stack and deserializes it.

use super::merge::merge_policy;
use super::sources::{environment, global_file};
use super::KontextConfig;
use crate::error::ContextError;
use std::path::Path;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, then the global config file, then `KONTEXT_*` environment overrides.
    pub fn load() -> Result<KontextConfig, ContextError> {
        Self::build(None)
    }

    /// Like `load`, with an explicit file layered above the global one.
    pub fn load_from_file(path: &Path) -> Result<KontextConfig, ContextError> {
        if !path.exists() {
            return Err(ContextError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        Self::build(Some(path))
    }

    fn build(explicit: Option<&Path>) -> Result<KontextConfig, ContextError> {
        let mut builder = merge_policy::builder_with_defaults()?;
        builder = global_file::add_to_builder(builder)?;
        if let Some(path) = explicit {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder = environment::add_to_builder(builder);

        let config: KontextConfig = builder.build()?.try_deserialize()?;
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ContextError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(config)
    }
}
