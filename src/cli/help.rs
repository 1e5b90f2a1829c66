//! CLI help and command-name contract.
//!
//! Backend help entries are registered explicitly: `assemble_command` builds the
//! clap command once and attaches the `context create` epilogue from the ordered
//! backend list. Nothing is registered at load time.

use crate::cli::parse::{Cli, Commands, ContextCommands, CreateCommands};
use crate::context::ContextType;
use clap::{Command, CommandFactory};

/// Command name string for logging (e.g. "context.create.kubernetes", "context.ls").
pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::Context { command } => format!("context.{}", context_command_name(command)),
    }
}

pub fn context_command_name(command: &ContextCommands) -> String {
    match command {
        ContextCommands::Create { command } => format!("create.{}", create_backend(command)),
        ContextCommands::Ls { .. } => "ls".to_string(),
        ContextCommands::Inspect { .. } => "inspect".to_string(),
    }
}

pub fn create_backend(command: &CreateCommands) -> ContextType {
    match command {
        CreateCommands::Kubernetes(_) => ContextType::Kubernetes,
        CreateCommands::Ecs(_) => ContextType::Ecs,
        CreateCommands::Local(_) => ContextType::Local,
    }
}

/// One line of backend help in the `context create` epilogue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendHelp {
    pub backend: ContextType,
    pub example: &'static str,
}

pub fn backend_help(backend: ContextType) -> BackendHelp {
    let example = match backend {
        ContextType::Kubernetes => {
            "kontext context create kubernetes my-cluster --endpoint https://10.0.0.1:6443"
        }
        ContextType::Ecs => "kontext context create ecs my-ecs --profile default",
        ContextType::Local => "kontext context create local my-engine",
    };
    BackendHelp { backend, example }
}

/// Help entries in registration order.
pub fn registered_backends() -> Vec<BackendHelp> {
    ContextType::ALL.into_iter().map(backend_help).collect()
}

pub fn render_create_epilogue(entries: &[BackendHelp]) -> String {
    let mut out = String::from("Backends:\n");
    for entry in entries {
        out.push_str(&format!("  {:<12} {}\n", entry.backend.slug(), entry.example));
    }
    out
}

/// Build the full clap command with backend help attached.
///
/// Called once by `main` before argument matching.
pub fn assemble_command() -> Command {
    let epilogue = render_create_epilogue(&registered_backends());
    Cli::command().mut_subcommand("context", |context| {
        context.mut_subcommand("create", |create| create.after_help(epilogue))
    })
}
