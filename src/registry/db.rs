//! Sled-backed registry. Records are bincode values keyed by context name;
//! creation is a compare-and-swap against an absent key.
//!
//! Sled holds an exclusive lock on its directory for as long as a handle is
//! open, so a second process (or a second handle in this one) cannot open the
//! same registry concurrently. Opening retries lock contention with bounded
//! backoff: callers racing on one registry serialize on the lock and each then
//! reaches the compare-and-swap.

use super::{ContextRegistry, ReservedNames};
use crate::context::ContextRecord;
use crate::error::StorageError;
use std::path::Path;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

const CONTEXTS_TREE: &str = "contexts";

/// Attempts at acquiring the database lock before giving up
const MAX_OPEN_ATTEMPTS: u32 = 40;
const INITIAL_OPEN_DELAY: Duration = Duration::from_millis(10);
const MAX_OPEN_DELAY: Duration = Duration::from_millis(250);

pub struct SledContextRegistry {
    tree: sled::Tree,
    reserved: ReservedNames,
}

fn db_error(action: &str, e: sled::Error) -> StorageError {
    StorageError::Database(format!("Failed to {}: {}", action, e))
}

/// True when `sled::open` failed because another handle holds the directory lock.
fn is_lock_contention(e: &sled::Error) -> bool {
    match e {
        sled::Error::Io(io) => {
            io.kind() == std::io::ErrorKind::WouldBlock
                || io.to_string().contains("could not acquire lock")
        }
        _ => false,
    }
}

/// The swap is the commit: once it succeeds the record is visible, so a
/// failed flush only gets logged.
fn flushed_after_commit(name: &str, flush: sled::Result<usize>) -> bool {
    match flush {
        Ok(_) => true,
        Err(e) => {
            warn!(context = %name, error = %e, "Context record committed but not flushed");
            false
        }
    }
}

fn open_with_backoff(path: &Path) -> Result<sled::Db, StorageError> {
    let mut delay = INITIAL_OPEN_DELAY;
    let mut attempt = 1;
    loop {
        match sled::open(path) {
            Ok(db) => return Ok(db),
            Err(e) if is_lock_contention(&e) && attempt < MAX_OPEN_ATTEMPTS => {
                debug!(path = %path.display(), attempt, "Registry database locked, retrying");
                thread::sleep(delay);
                delay = (delay * 2).min(MAX_OPEN_DELAY);
                attempt += 1;
            }
            Err(e) => {
                return Err(StorageError::Database(format!(
                    "Failed to open sled database {}: {}",
                    path.display(),
                    e
                )))
            }
        }
    }
}

impl SledContextRegistry {
    /// Open a registry database at the given directory, waiting out other
    /// holders of its lock.
    ///
    /// The returned handle keeps the lock until it is dropped.
    pub fn new<P: AsRef<Path>>(path: P, reserved: ReservedNames) -> Result<Self, StorageError> {
        let db = open_with_backoff(path.as_ref())?;
        Self::from_db(&db, reserved)
    }

    /// Use the contexts tree of an already open database
    pub fn from_db(db: &sled::Db, reserved: ReservedNames) -> Result<Self, StorageError> {
        let tree = db
            .open_tree(CONTEXTS_TREE)
            .map_err(|e| db_error("open contexts tree", e))?;
        Ok(Self { tree, reserved })
    }

    fn decode(value: &[u8]) -> Result<ContextRecord, StorageError> {
        let record: ContextRecord = bincode::deserialize(value).map_err(|e| {
            StorageError::Serialization(format!("Failed to deserialize context record: {}", e))
        })?;
        if !record.is_consistent() {
            return Err(StorageError::Serialization(format!(
                "Context record {:?} has mismatched type tag",
                record.name
            )));
        }
        Ok(record)
    }
}

impl ContextRegistry for SledContextRegistry {
    fn exists(&self, name: &str) -> Result<bool, StorageError> {
        if self.reserved.contains(name) {
            return Ok(true);
        }
        self.tree
            .contains_key(name.as_bytes())
            .map_err(|e| db_error("check context existence", e))
    }

    fn create(&self, record: &ContextRecord) -> Result<(), StorageError> {
        if self.reserved.contains(&record.name) {
            return Err(StorageError::AlreadyExists(record.name.clone()));
        }

        let value = bincode::serialize(record).map_err(|e| {
            StorageError::Serialization(format!("Failed to serialize context record: {}", e))
        })?;

        let swapped = self
            .tree
            .compare_and_swap(record.name.as_bytes(), None::<&[u8]>, Some(value))
            .map_err(|e| db_error("write context record", e))?;
        if swapped.is_err() {
            return Err(StorageError::AlreadyExists(record.name.clone()));
        }

        flushed_after_commit(&record.name, self.tree.flush());
        Ok(())
    }

    fn get(&self, name: &str) -> Result<Option<ContextRecord>, StorageError> {
        match self
            .tree
            .get(name.as_bytes())
            .map_err(|e| db_error("read context record", e))?
        {
            Some(value) => Ok(Some(Self::decode(&value)?)),
            None => Ok(None),
        }
    }

    fn list(&self) -> Result<Vec<ContextRecord>, StorageError> {
        // sled iterates in key order, which is name order
        let mut records = Vec::new();
        for item in self.tree.iter() {
            let (_, value) = item.map_err(|e| db_error("iterate contexts", e))?;
            records.push(Self::decode(&value)?);
        }
        Ok(records)
    }
}
