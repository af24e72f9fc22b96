//! Identity-scoped storage keys.
//!
//! Four keys per store:
//!
//! | Collection | Guest | Account |
//! |------------|-------|---------|
//! | cart | `cart:guest` | `cart:<accountId>` |
//! | wishlist | `wishlist:guest` | `wishlist:<accountId>` |
//!
//! [`AccountId`](autolot_core::AccountId) refuses the `guest` token, so an
//! account key never equals the guest key, and the collection prefix keeps cart
//! and wishlist keys apart.

use core::fmt;

use autolot_core::Identity;

const GUEST_SEGMENT: &str = "guest";

/// The persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Cart,
    Wishlist,
}

impl CollectionKind {
    /// Key prefix for this collection.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Cart => "cart",
            Self::Wishlist => "wishlist",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// A derived storage key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Derive the storage key for a collection owned by `identity`.
#[must_use]
pub fn key_for(kind: CollectionKind, identity: &Identity) -> StorageKey {
    let owner = match identity {
        Identity::Guest => GUEST_SEGMENT,
        Identity::Identified(account) => account.as_str(),
    };
    StorageKey(format!("{}:{owner}", kind.prefix()))
}
