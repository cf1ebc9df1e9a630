//! In-memory key-value storage for tests and ephemeral sessions.

use super::{KeyValueStore, StorageError, StorageResult};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

/// Map-backed storage with optional write-failure injection.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: RefCell<BTreeMap<String, String>>,
    fail_writes: Cell<bool>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds one raw value, bypassing failure injection.
    pub fn with_entry(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.borrow_mut().insert(key.into(), value.into());
        self
    }

    /// Makes subsequent `set`/`remove` calls fail with `Unavailable`.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn check_writable(&self) -> StorageResult<()> {
        if self.fail_writes.get() {
            return Err(StorageError::Unavailable(
                "memory store is rejecting writes".to_string(),
            ));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.check_writable()?;
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<bool> {
        self.check_writable()?;
        Ok(self.entries.borrow_mut().remove(key).is_some())
    }
}
