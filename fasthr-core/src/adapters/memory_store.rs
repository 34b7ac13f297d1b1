//! In-memory key-value store
//!
//! Nothing survives the process. Used by tests and for one-shot sessions.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::result::{Error, Result};
use crate::ports::KeyValueStore;

#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| Error::storage(format!("Lock poisoned: {}", e)))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| Error::storage(format!("Lock poisoned: {}", e)))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| Error::storage(format!("Lock poisoned: {}", e)))?;
        entries.remove(key);
        Ok(())
    }
}

/// Memory store whose writes can be made to fail
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct FaultyKeyValueStore {
    inner: MemoryKeyValueStore,
    fail_removes: std::sync::atomic::AtomicBool,
    // key -> number of upcoming `set` calls that fail
    failing_sets: Mutex<HashMap<String, usize>>,
}

#[cfg(test)]
impl FaultyKeyValueStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fail_removes(&self, fail: bool) {
        self.fail_removes
            .store(fail, std::sync::atomic::Ordering::SeqCst);
    }

    pub(crate) fn fail_next_sets(&self, key: &str, times: usize) {
        self.failing_sets
            .lock()
            .unwrap()
            .insert(key.to_string(), times);
    }
}

#[cfg(test)]
impl KeyValueStore for FaultyKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut failing = self.failing_sets.lock().unwrap();
        if let Some(remaining) = failing.get_mut(key).filter(|n| **n > 0) {
            *remaining -= 1;
            return Err(Error::storage(format!("write to '{}' refused", key)));
        }
        drop(failing);
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        if self.fail_removes.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(Error::storage(format!("remove of '{}' refused", key)));
        }
        self.inner.remove(key)
    }
}
