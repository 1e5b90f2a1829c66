//! Error types for context management.

use crate::context::ContextType;
use thiserror::Error;

/// Registry-level errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// The name is already taken, either by a persisted record or a reserved built-in
    #[error("context {0:?} already exists")]
    AlreadyExists(String),

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// Errors surfaced by context operations
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("context {0:?}: already exists")]
    AlreadyExists(String),

    #[error("invalid context name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    #[error("{backend} context: {message}")]
    BackendResolution {
        backend: ContextType,
        message: String,
    },

    /// Registry failure, tagged with the context name that was being operated on
    #[error("context {name:?}: {source}")]
    Registry {
        name: String,
        #[source]
        source: StorageError,
    },

    /// Registry failure not tied to one context name (opening or listing)
    #[error("context registry: {0}")]
    RegistryAccess(#[source] StorageError),

    #[error("context {0:?} not found")]
    NotFound(String),

    #[error("context {0:?}: creation cancelled")]
    Cancelled(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ContextError {
    /// Wrap a registry error with the attempted name.
    ///
    /// `StorageError::AlreadyExists` is lifted to `ContextError::AlreadyExists`
    /// so a lost creation race reads the same as a failed pre-check.
    pub fn from_registry(name: &str, source: StorageError) -> Self {
        match source {
            StorageError::AlreadyExists(_) => ContextError::AlreadyExists(name.to_string()),
            source => ContextError::Registry {
                name: name.to_string(),
                source,
            },
        }
    }

    /// True when the error means the name is taken.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, ContextError::AlreadyExists(_))
    }
}

impl From<config::ConfigError> for ContextError {
    fn from(err: config::ConfigError) -> Self {
        ContextError::ConfigError(err.to_string())
    }
}
