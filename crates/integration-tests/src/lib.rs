//! Integration tests for Autolot.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p autolot-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `session_lifecycle` - Login merge and logout across session instances
//! - `storage_isolation` - Identity-scoped keys in a shared file store
//! - `identity_sync` - Resolving identity through an observer

#![allow(clippy::unwrap_used)]

use std::path::PathBuf;

use rust_decimal::Decimal;
use tempfile::TempDir;

use autolot_core::{AccountId, Identity};
use autolot_storefront::{CartSession, FileStore, Listing};

/// A temporary directory holding one store file, shared by many sessions.
pub struct TestStore {
    _dir: TempDir,
    path: PathBuf,
}

impl TestStore {
    /// Create an empty store in a fresh temporary directory.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        Self { _dir: dir, path }
    }

    /// Path of the store file.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Open a new session over the store and hydrate it for `identity`.
    ///
    /// Each call models a separate process or page load.
    #[must_use]
    pub fn open(&self, identity: Identity) -> CartSession<FileStore> {
        let mut session = CartSession::new(FileStore::new(&self.path));
        session.observe_identity(identity);
        session
    }
}

impl Default for TestStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an account id.
#[must_use]
pub fn account(id: &str) -> Identity {
    Identity::Identified(AccountId::parse(id).unwrap())
}

/// A listing priced in whole dollars.
#[must_use]
pub fn listing(id: &str, dollars: i64) -> Listing {
    Listing::new(id, Decimal::from(dollars))
}
