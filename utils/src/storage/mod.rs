//! Key-value persistence with an explicit fallback policy.
//!
//! [`KeyValueStore`] is the host-provided durable store: string keys mapped to
//! opaque string values. [`Storage`] layers JSON encoding on top and offers two
//! families of operations:
//!
//! - `read` / `write` / `delete` return [`StorageError`] so callers can react.
//! - `get_item` / `set_item` / `remove_item` never fail: reads fall back to a
//!   caller-supplied default, writes report only whether they took effect.
//!   Swallowed failures are logged through `tracing`.

mod file;
mod memory;

use std::io;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, error};

pub use file::FileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("no key-value store is available on this host")]
    Unavailable,
    #[error("storing {needed} bytes would exceed the {quota}-byte quota")]
    QuotaExceeded { needed: usize, quota: usize },
    #[error("failed to access store file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("store file {path} is not a JSON object of strings: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode value for key '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("value for key '{key}' does not decode to the requested type: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A durable string-to-string map supplied by the host.
///
/// Last write wins. There is no expiry and no transaction support.
pub trait KeyValueStore: Send + Sync {
    /// `Ok(None)` when the key has never been set or was removed.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Stand-in for hosts without any durable store. Every call fails with
/// [`StorageError::Unavailable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}

/// JSON-typed access to a [`KeyValueStore`].
#[derive(Debug)]
pub struct Storage<S> {
    store: S,
}

impl<S: KeyValueStore> Storage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Decode the value under `key`. A missing key or an empty stored string is `Ok(None)`.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };
        if raw.is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Decode {
                key: key.to_string(),
                source,
            })
    }

    pub fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.store.set(key, &raw)
    }

    pub fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.store.remove(key)
    }

    /// The decoded value under `key`, or `fallback` if it is missing, empty,
    /// undecodable, or the store itself fails.
    pub fn get_item<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        match self.read(key) {
            Ok(Some(value)) => value,
            Ok(None) => fallback,
            Err(e) => {
                debug!(key, "Storage read failed, using fallback: {e}");
                fallback
            }
        }
    }

    /// Returns `false` (after logging) instead of an error when the write fails.
    pub fn set_item<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        match self.write(key, value) {
            Ok(()) => true,
            Err(e) => {
                error!(key, "Error setting storage item: {e}");
                false
            }
        }
    }

    /// Returns `false` (after logging) instead of an error when the removal fails.
    pub fn remove_item(&self, key: &str) -> bool {
        match self.delete(key) {
            Ok(()) => true,
            Err(e) => {
                error!(key, "Error removing storage item: {e}");
                false
            }
        }
    }
}
