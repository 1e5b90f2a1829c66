//! CLI route: single route table and run context. Dispatches to the context
//! command service and presentation.

use crate::cli::help::command_name;
use crate::cli::parse::{
    Commands, ContextCommands, CreateCommands, EcsCreateArgs, KubernetesCreateArgs,
    LocalCreateArgs,
};
use crate::cli::presentation::{
    format_context_create_result, format_context_inspect_result_json,
    format_context_inspect_result_text, format_context_list_result_json,
    format_context_list_result_text,
};
use crate::config::{ConfigLoader, KontextConfig};
use crate::context::{
    BackendOptions, CancelSignal, ContextCommandService, EcsContextParams, KubeContextParams,
    LocalContextParams,
};
use crate::error::ContextError;
use crate::registry::{open_registry, ContextRegistry};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Runtime context for CLI execution: loaded config, the opened registry, and
/// the cancel signal shared with whoever handles interrupts.
pub struct RunContext {
    config: KontextConfig,
    registry: Arc<dyn ContextRegistry>,
    cancel: CancelSignal,
}

impl RunContext {
    /// Create run context from an optional config path and registry location override.
    pub fn new(
        config_path: Option<PathBuf>,
        registry_path: Option<PathBuf>,
    ) -> Result<Self, ContextError> {
        let mut config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        if let Some(path) = registry_path {
            config.registry.path = Some(path);
        }
        Self::with_config(config)
    }

    pub fn with_config(config: KontextConfig) -> Result<Self, ContextError> {
        let registry = open_registry(&config.registry).map_err(ContextError::RegistryAccess)?;
        Ok(Self {
            config,
            registry,
            cancel: CancelSignal::new(),
        })
    }

    pub fn registry(&self) -> &dyn ContextRegistry {
        self.registry.as_ref()
    }

    /// Handle to the signal checked before each commit.
    pub fn cancel_signal(&self) -> CancelSignal {
        self.cancel.clone()
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ContextError> {
        let started = Instant::now();
        let name = command_name(command);
        debug!(command = %name, "Executing command");

        let result = match command {
            Commands::Context { command } => self.handle_context_command(command),
        };

        debug!(
            command = %name,
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn handle_context_command(&self, command: &ContextCommands) -> Result<String, ContextError> {
        match command {
            ContextCommands::Create { command } => self.handle_context_create(command),
            ContextCommands::Ls {
                format,
                type_filter,
            } => self.handle_context_list(format, type_filter.as_deref()),
            ContextCommands::Inspect { name, format } => self.handle_context_inspect(name, format),
        }
    }

    fn handle_context_create(&self, command: &CreateCommands) -> Result<String, ContextError> {
        let (name, options) = backend_options(command);
        let result =
            ContextCommandService::run_create(self.registry(), name, options, &self.cancel)?;
        Ok(format_context_create_result(&result))
    }

    fn handle_context_list(
        &self,
        format: &str,
        type_filter: Option<&str>,
    ) -> Result<String, ContextError> {
        // Built-ins have no type, so a type filter hides them.
        let reserved: &[String] = if type_filter.is_some() {
            &[]
        } else {
            &self.config.registry.reserved_names
        };
        let result = ContextCommandService::run_list(self.registry(), reserved, type_filter)?;
        match format {
            "json" => Ok(format_context_list_result_json(&result)),
            _ => Ok(format_context_list_result_text(&result)),
        }
    }

    fn handle_context_inspect(&self, name: &str, format: &str) -> Result<String, ContextError> {
        let result = ContextCommandService::run_inspect(self.registry(), name)?;
        match format {
            "json" => Ok(format_context_inspect_result_json(&result)),
            _ => Ok(format_context_inspect_result_text(&result)),
        }
    }
}

/// Map parsed create arguments to the attempted name and backend options.
pub fn backend_options(command: &CreateCommands) -> (&str, BackendOptions) {
    match command {
        CreateCommands::Kubernetes(KubernetesCreateArgs {
            name,
            description,
            endpoint,
            from_env,
        }) => (
            name.as_str(),
            BackendOptions::Kubernetes(KubeContextParams {
                description: description.clone(),
                endpoint: endpoint.clone(),
                from_environment: *from_env,
            }),
        ),
        CreateCommands::Ecs(EcsCreateArgs {
            name,
            description,
            profile,
            from_env,
        }) => (
            name.as_str(),
            BackendOptions::Ecs(EcsContextParams {
                description: description.clone(),
                profile: profile.clone(),
                from_environment: *from_env,
            }),
        ),
        CreateCommands::Local(LocalCreateArgs { name, description }) => (
            name.as_str(),
            BackendOptions::Local(LocalContextParams {
                description: description.clone(),
            }),
        ),
    }
}
