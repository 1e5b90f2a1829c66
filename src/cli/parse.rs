//! CLI parse: clap types for kontext. No behavior; definitions only.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Kontext CLI - named connection contexts for container backends
#[derive(Parser, Debug)]
#[command(name = "kontext")]
#[command(about = "Manage named contexts for Kubernetes, ECS, and local engines")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over the global config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Registry location (overrides registry.path from config)
    #[arg(long, global = true)]
    pub registry_path: Option<PathBuf>,

    /// Enable verbose logging (sets level to debug)
    #[arg(long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage contexts
    Context {
        #[command(subcommand)]
        command: ContextCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ContextCommands {
    /// Create a context
    Create {
        #[command(subcommand)]
        command: CreateCommands,
    },
    /// List contexts
    #[command(alias = "list")]
    Ls {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Only show contexts of this type (kubernetes, ecs, local)
        #[arg(long = "type")]
        type_filter: Option<String>,
    },
    /// Display detailed information on a context
    Inspect {
        /// Context name
        name: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum CreateCommands {
    /// Create a context for a Kubernetes cluster
    Kubernetes(KubernetesCreateArgs),
    /// Create a context for Amazon ECS
    Ecs(EcsCreateArgs),
    /// Create a context for the local engine
    Local(LocalCreateArgs),
}

#[derive(Args, Debug)]
pub struct KubernetesCreateArgs {
    /// Context name
    #[arg(value_name = "CONTEXT_NAME")]
    pub name: String,

    /// Description of the context
    #[arg(long, default_value = "")]
    pub description: String,

    /// API server endpoint; takes precedence over --from-env
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Discover the cluster from the environment (KUBECONFIG, in-cluster config)
    #[arg(
        long = "from-env",
        default_value_t = true,
        num_args = 0..=1,
        default_missing_value = "true",
        require_equals = true,
        action = ArgAction::Set
    )]
    pub from_env: bool,
}

#[derive(Args, Debug)]
pub struct EcsCreateArgs {
    /// Context name
    #[arg(value_name = "CONTEXT_NAME")]
    pub name: String,

    /// Description of the context
    #[arg(long, default_value = "")]
    pub description: String,

    /// Credentials profile to use
    #[arg(long)]
    pub profile: Option<String>,

    /// Take credentials from the environment instead of a profile
    #[arg(
        long = "from-env",
        default_value_t = false,
        num_args = 0..=1,
        default_missing_value = "true",
        require_equals = true,
        action = ArgAction::Set
    )]
    pub from_env: bool,
}

#[derive(Args, Debug)]
pub struct LocalCreateArgs {
    /// Context name
    #[arg(value_name = "CONTEXT_NAME")]
    pub name: String,

    /// Description of the context
    #[arg(long, default_value = "")]
    pub description: String,
}
