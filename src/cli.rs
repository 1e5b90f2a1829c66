//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration; single route table dispatches to the context command service.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::{assemble_command, command_name, render_create_epilogue, BackendHelp};
pub use output::{exit_code, map_error};
pub use parse::{
    Cli, Commands, ContextCommands, CreateCommands, EcsCreateArgs, KubernetesCreateArgs,
    LocalCreateArgs,
};
pub use presentation::{
    format_context_create_result, format_context_inspect_result_json,
    format_context_inspect_result_text, format_context_list_result_json,
    format_context_list_result_text,
};
pub use route::{backend_options, RunContext};
