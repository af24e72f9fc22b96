//! Persistent key-value store seam.
//!
//! The session manager persists through a synchronous, string-keyed store with
//! no transactions. In a browser this is the origin's durable storage; here it
//! is a trait with two implementations:
//!
//! - [`MemoryStore`] - shared in-process map with an optional byte quota
//! - [`FileStore`] - one JSON document on disk holding every key
//!
//! Writes can fail (a full store, an I/O error). Callers treat a failed write
//! as a warning: in-memory state stays authoritative for the session.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Errors raised by a [`KeyValueStore`].
#[derive(Debug, Error)]
pub enum StorageError {
    /// The store is full.
    #[error("storage quota of {limit} bytes exceeded writing {key}")]
    QuotaExceeded {
        /// Key being written.
        key: String,
        /// Configured capacity in bytes.
        limit: usize,
    },

    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing document could not be (de)serialized.
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A previous holder of the store lock panicked.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// A synchronous string to string store.
///
/// Methods take `&self`; implementations use interior mutability so a handle
/// can be cloned and shared between the session and its observers.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is full or cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
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
