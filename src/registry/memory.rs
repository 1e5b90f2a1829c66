//! In-memory registry: a lock-guarded map, for tests and embedding.

use super::{ContextRegistry, ReservedNames};
use crate::context::ContextRecord;
use crate::error::StorageError;
use parking_lot::RwLock;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

pub struct MemoryContextRegistry {
    records: RwLock<BTreeMap<String, ContextRecord>>,
    reserved: ReservedNames,
}

impl MemoryContextRegistry {
    pub fn new(reserved: ReservedNames) -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            reserved,
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl Default for MemoryContextRegistry {
    fn default() -> Self {
        Self::new(ReservedNames::new(["default"]))
    }
}

impl ContextRegistry for MemoryContextRegistry {
    fn exists(&self, name: &str) -> Result<bool, StorageError> {
        Ok(self.reserved.contains(name) || self.records.read().contains_key(name))
    }

    fn create(&self, record: &ContextRecord) -> Result<(), StorageError> {
        if self.reserved.contains(&record.name) {
            return Err(StorageError::AlreadyExists(record.name.clone()));
        }
        // Check and insert under one write guard
        match self.records.write().entry(record.name.clone()) {
            Entry::Occupied(_) => Err(StorageError::AlreadyExists(record.name.clone())),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(())
            }
        }
    }

    fn get(&self, name: &str) -> Result<Option<ContextRecord>, StorageError> {
        Ok(self.records.read().get(name).cloned())
    }

    fn list(&self) -> Result<Vec<ContextRecord>, StorageError> {
        Ok(self.records.read().values().cloned().collect())
    }
}
