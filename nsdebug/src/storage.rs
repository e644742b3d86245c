//! Durable key-value stores holding the filter string between runs.

use std::collections::HashMap;
use std::env::{self, VarError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::StorageError;

/// Key the filter string is stored under by default.
pub const DEFAULT_STORAGE_KEY: &str = "debug";

/// Environment variable read by [`EnvStorage::default`].
pub const DEFAULT_ENV_VAR: &str = "DEBUG";

/// Trait for the persisted filter store.
///
/// Every failure is recoverable: the context treats an erroring store as
/// if persistence were absent.
pub trait Storage: Send + Sync {
    /// Read a value. `Ok(None)` means the key was never written.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    fn store(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Process-local store, shared between clones.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with one key already set.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.lock().insert(key.into(), value.into());
        storage
    }

    /// Read a value directly, bypassing the trait.
    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.get(key))
    }

    fn store(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory holding the key files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key != "."
            && key != ".."
            && !key.contains(['/', '\\', '\0']);

        if valid {
            Ok(self.dir.join(key))
        } else {
            Err(StorageError::InvalidKey {
                key: key.to_string(),
            })
        }
    }
}

impl Storage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StorageError::Io {
                    key: key.to_string(),
                    source,
                });
            }
        };

        String::from_utf8(bytes)
            .map(Some)
            .map_err(|_| StorageError::NotUnicode {
                key: key.to_string(),
            })
    }

    fn store(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let io_err = |source: io::Error| StorageError::Io {
            key: key.to_string(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(io_err)?;
        fs::write(path, value).map_err(io_err)
    }
}

/// Read-only store backed by one environment variable.
///
/// The key is ignored; every write fails with [`StorageError::ReadOnly`].
#[derive(Debug, Clone)]
pub struct EnvStorage {
    var: String,
}

impl EnvStorage {
    /// Read from the given variable.
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    /// Name of the variable.
    pub fn var(&self) -> &str {
        &self.var
    }
}

impl Default for EnvStorage {
    fn default() -> Self {
        Self::new(DEFAULT_ENV_VAR)
    }
}

impl Storage for EnvStorage {
    fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
        match env::var(&self.var) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => Err(StorageError::NotUnicode {
                key: self.var.clone(),
            }),
        }
    }

    fn store(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::ReadOnly {
            key: key.to_string(),
        })
    }
}

/// A store that is disabled: every access fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

impl Storage for Unavailable {
    fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn store(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}
