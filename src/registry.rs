//! Context Registry
//!
//! The registry owns every persisted context and is the only authority on
//! whether a name is taken. Callers may check `exists` first for a friendly
//! error, but uniqueness is enforced by `create`, which must behave as an
//! atomic check-and-set: when two creators race on one name, exactly one
//! record is written and the other caller gets `StorageError::AlreadyExists`.
//! A record is never visible half-written.

use crate::config::{RegistryBackend, RegistryConfig};
use crate::context::ContextRecord;
use crate::error::StorageError;
use std::sync::Arc;

pub mod db;
pub mod file;
pub mod memory;

pub use db::SledContextRegistry;
pub use file::FileContextRegistry;
pub use memory::MemoryContextRegistry;

/// Storage port for context records
pub trait ContextRegistry: Send + Sync {
    /// True if `name` is persisted or reserved by the platform.
    fn exists(&self, name: &str) -> Result<bool, StorageError>;

    /// Persist a new record, failing with `AlreadyExists` if the name is taken.
    fn create(&self, record: &ContextRecord) -> Result<(), StorageError>;

    /// Load one record. Reserved names have no record.
    fn get(&self, name: &str) -> Result<Option<ContextRecord>, StorageError>;

    /// All persisted records, sorted by name.
    fn list(&self) -> Result<Vec<ContextRecord>, StorageError>;
}

/// Built-in context names that can never be created.
#[derive(Debug, Clone, Default)]
pub struct ReservedNames(Vec<String>);

impl ReservedNames {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|reserved| reserved == name)
    }
}

/// Open the registry selected by configuration.
pub fn open_registry(config: &RegistryConfig) -> Result<Arc<dyn ContextRegistry>, StorageError> {
    let reserved = ReservedNames::new(config.reserved_names.iter().cloned());
    let path = config.resolve_path()?;
    tracing::debug!(backend = ?config.backend, path = %path.display(), "Opening context registry");

    match config.backend {
        RegistryBackend::File => Ok(Arc::new(FileContextRegistry::new(path, reserved)?)),
        RegistryBackend::Sled => Ok(Arc::new(SledContextRegistry::new(path, reserved)?)),
    }
}
