//! File-backed registry: one TOML file per context.
//!
//! Layout: `<root>/meta/<blake3(name)>.toml`. Hashing the name keeps any
//! user-chosen string (slashes, spaces, unicode) off the filesystem path.
//! A record is written to a temp file in the same directory, synced, then
//! linked into place without clobbering. The link is the check-and-set, so
//! concurrent creators of one name cannot both succeed and readers only
//! ever see complete files.

use super::{ContextRegistry, ReservedNames};
use crate::context::ContextRecord;
use crate::error::StorageError;
use std::ffi::OsStr;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub struct FileContextRegistry {
    meta_dir: PathBuf,
    reserved: ReservedNames,
}

/// File stem for a context name.
pub fn context_file_stem(name: &str) -> String {
    hex::encode(blake3::hash(name.as_bytes()).as_bytes())
}

impl FileContextRegistry {
    /// Open (creating if needed) a registry rooted at `root`.
    pub fn new(root: impl Into<PathBuf>, reserved: ReservedNames) -> Result<Self, StorageError> {
        let meta_dir = root.into().join("meta");
        std::fs::create_dir_all(&meta_dir).map_err(|e| {
            StorageError::IoError(std::io::Error::new(
                e.kind(),
                format!("Failed to create contexts directory {}: {}", meta_dir.display(), e),
            ))
        })?;
        Ok(Self { meta_dir, reserved })
    }

    pub fn meta_dir(&self) -> &Path {
        &self.meta_dir
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.meta_dir.join(format!("{}.toml", context_file_stem(name)))
    }

    fn read_record(path: &Path) -> Result<ContextRecord, StorageError> {
        let content = std::fs::read_to_string(path)?;
        let record: ContextRecord = toml::from_str(&content).map_err(|e| {
            StorageError::Serialization(format!(
                "Failed to parse context file {}: {}",
                path.display(),
                e
            ))
        })?;
        if !record.is_consistent() {
            return Err(StorageError::Serialization(format!(
                "Context file {} has type {} but a {} payload",
                path.display(),
                record.context_type,
                record.endpoint.context_type()
            )));
        }
        Ok(record)
    }
}

impl ContextRegistry for FileContextRegistry {
    fn exists(&self, name: &str) -> Result<bool, StorageError> {
        if self.reserved.contains(name) {
            return Ok(true);
        }
        Ok(self.path_for(name).try_exists()?)
    }

    fn create(&self, record: &ContextRecord) -> Result<(), StorageError> {
        if self.reserved.contains(&record.name) {
            return Err(StorageError::AlreadyExists(record.name.clone()));
        }

        let path = self.path_for(&record.name);
        let content = toml::to_string_pretty(record).map_err(|e| {
            StorageError::Serialization(format!("Failed to serialize context record: {}", e))
        })?;

        let mut staged = NamedTempFile::new_in(&self.meta_dir)?;
        staged.write_all(content.as_bytes())?;
        staged.as_file().sync_all()?;

        match staged.persist_noclobber(&path) {
            Ok(_) => {
                tracing::debug!(context = %record.name, path = %path.display(), "Context file written");
                Ok(())
            }
            // The staged temp file is removed when the error is dropped
            Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
                Err(StorageError::AlreadyExists(record.name.clone()))
            }
            Err(e) => Err(StorageError::IoError(e.error)),
        }
    }

    fn get(&self, name: &str) -> Result<Option<ContextRecord>, StorageError> {
        let path = self.path_for(name);
        if !path.try_exists()? {
            return Ok(None);
        }
        let record = Self::read_record(&path)?;
        if record.name != name {
            return Err(StorageError::Serialization(format!(
                "Context file {} belongs to {:?}, not {:?}",
                path.display(),
                record.name,
                name
            )));
        }
        Ok(Some(record))
    }

    fn list(&self) -> Result<Vec<ContextRecord>, StorageError> {
        let entries = std::fs::read_dir(&self.meta_dir)?;
        let mut records = Vec::new();

        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!(
                        "Failed to read directory entry in {}: {}",
                        self.meta_dir.display(),
                        e
                    );
                    continue;
                }
            };

            let path = entry.path();
            // Skips staged temp files as well as anything foreign
            if path.extension() != Some(OsStr::new("toml")) {
                continue;
            }

            match Self::read_record(&path) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::error!("Skipping unreadable context file {}: {}", path.display(), e);
                }
            }
        }

        records.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(records)
    }
}
