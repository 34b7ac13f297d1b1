//! Key-value persistence port
//!
//! The session survives process restarts through this interface. Anything
//! that can durably map string keys to string values can back it.

use crate::domain::result::Result;

/// Durable string key-value store
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` if the key is absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key; removing an absent key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}
