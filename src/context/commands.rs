//! Context command service: one entry point per context CLI command.
//!
//! The CLI parses, calls one method per variant, and formats the result.

use crate::context::backend::BackendOptions;
use crate::context::cancel::CancelSignal;
use crate::context::create::create_context;
use crate::context::types::{ContextRecord, ContextType};
use crate::error::ContextError;
use crate::registry::ContextRegistry;

pub struct ContextCommandService;

/// Result of context create command.
#[derive(Debug, Clone)]
pub struct ContextCreateResult {
    pub record: ContextRecord,
}

/// Result of context list command.
#[derive(Debug, Clone)]
pub struct ContextListResult {
    pub contexts: Vec<ContextRecord>,
    /// Built-in names, shown but not stored
    pub reserved: Vec<String>,
}

/// Result of context inspect command.
#[derive(Debug, Clone)]
pub struct ContextInspectResult {
    pub record: ContextRecord,
}

impl ContextCommandService {
    pub fn run_create(
        registry: &dyn ContextRegistry,
        name: &str,
        options: BackendOptions,
        cancel: &CancelSignal,
    ) -> Result<ContextCreateResult, ContextError> {
        let record = create_context(registry, name, options, cancel)?;
        Ok(ContextCreateResult { record })
    }

    /// List contexts, optionally filtered by backend slug.
    pub fn run_list(
        registry: &dyn ContextRegistry,
        reserved: &[String],
        type_filter: Option<&str>,
    ) -> Result<ContextListResult, ContextError> {
        let filter = type_filter
            .map(|slug| {
                ContextType::parse(slug).ok_or_else(|| {
                    ContextError::ConfigError(format!(
                        "Invalid type filter: {}. Must be kubernetes, ecs, or local",
                        slug
                    ))
                })
            })
            .transpose()?;

        let contexts = registry
            .list()
            .map_err(ContextError::RegistryAccess)?
            .into_iter()
            .filter(|record| filter.map_or(true, |t| record.context_type == t))
            .collect();

        Ok(ContextListResult {
            contexts,
            reserved: reserved.to_vec(),
        })
    }

    pub fn run_inspect(
        registry: &dyn ContextRegistry,
        name: &str,
    ) -> Result<ContextInspectResult, ContextError> {
        let record = registry
            .get(name)
            .map_err(|e| ContextError::from_registry(name, e))?
            .ok_or_else(|| ContextError::NotFound(name.to_string()))?;
        Ok(ContextInspectResult { record })
    }
}
