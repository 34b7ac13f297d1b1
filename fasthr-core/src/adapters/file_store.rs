//! File-backed key-value store
//!
//! Keeps all entries in one JSON object file (`session.json`) inside the
//! FastHR directory. Writes replace the file atomically via a temp file and
//! rename, and hold an exclusive lock on `session.lock` so two `hr`
//! processes never interleave a read-modify-write cycle.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tempfile::NamedTempFile;

use crate::domain::result::{Error, Result};
use crate::ports::KeyValueStore;

/// Session file name inside the FastHR directory
pub const SESSION_FILE: &str = "session.json";

const LOCK_FILE: &str = "session.lock";

/// Durable key-value store over a single JSON file
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    path: PathBuf,
    lock_path: PathBuf,
}

impl FileKeyValueStore {
    /// Store entries in `dir/session.json`
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(SESSION_FILE),
            lock_path: dir.join(LOCK_FILE),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Take the cross-process write lock; released when the file is dropped
    fn lock(&self) -> Result<File> {
        fs::create_dir_all(self.dir())?;
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.lock_path)?;
        FileExt::lock_exclusive(&file).map_err(|e| {
            Error::storage(format!(
                "Failed to lock {}: {}",
                self.lock_path.display(),
                e
            ))
        })?;
        Ok(file)
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            Error::storage(format!(
                "Session file {} is corrupt: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let content = serde_json::to_string_pretty(entries)?;

        // NamedTempFile is created 0600 on Unix, and rename keeps the mode
        let mut tmp = NamedTempFile::new_in(self.dir())?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        Ok(())
    }

    /// Apply a change under the write lock
    ///
    /// A corrupt file is replaced rather than reported, so logout can always
    /// recover from a damaged session file.
    fn update(&self, change: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<()> {
        let _lock = self.lock()?;
        let mut entries = self.read_entries().unwrap_or_default();
        change(&mut entries);
        self.write_entries(&entries)
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|entries| {
            entries.remove(key);
        })
    }
}
