//! CLI output: error mapping from domain errors to the stable CLI surface.

use crate::error::ContextError;

/// Map domain/service errors to a string for CLI output.
///
/// Registry failures already render their storage error; anything beneath that
/// (the io error behind a storage error, say) is appended as a cause line.
pub fn map_error(e: &ContextError) -> String {
    match e {
        ContextError::Registry { source, .. } | ContextError::RegistryAccess(source) => {
            match cause_chain(source) {
                Some(causes) => format!("{}\nCaused by: {}", e, causes),
                None => e.to_string(),
            }
        }
        _ => e.to_string(),
    }
}

fn cause_chain(err: &dyn std::error::Error) -> Option<String> {
    let mut parts = Vec::new();
    let mut current = err.source();
    while let Some(cause) = current {
        parts.push(cause.to_string());
        current = cause.source();
    }
    (!parts.is_empty()).then(|| parts.join(": "))
}

/// Process exit code for a failed command.
pub fn exit_code(e: &ContextError) -> i32 {
    match e {
        ContextError::AlreadyExists(_) => 2,
        ContextError::InvalidName { .. } | ContextError::BackendResolution { .. } => 3,
        ContextError::Registry { .. } | ContextError::RegistryAccess(_) => 4,
        ContextError::Cancelled(_) => 130,
        ContextError::NotFound(_) | ContextError::ConfigError(_) => 1,
    }
}
