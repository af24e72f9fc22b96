//! Autolot Storefront library.
//!
//! The cart and wishlist session manager behind every storefront screen. It
//! reconciles the anonymous guest shopper and the signed-in account holder
//! against one persisted cart and wishlist, merges their contents exactly once
//! at login, and keeps each identity's data under its own storage keys.
//!
//! # Architecture
//!
//! - [`storage`] - Synchronous string key-value store seam (memory and file backed)
//! - [`keys`] - Identity-scoped storage key derivation
//! - [`persist`] - Versioned JSON envelope for stored collections
//! - [`merge`] - Pure guest/account merge functions
//! - [`identity`] - Identity observer seam and login/logout transition detection
//! - [`session`] - The [`CartSession`] owning cart, wishlist and aggregates
//! - [`config`] - Environment configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod identity;
pub mod keys;
pub mod merge;
pub mod models;
pub mod persist;
pub mod session;
pub mod storage;

pub use error::SessionError;
pub use identity::{IdentityObserver, IdentityState, Transition, TransitionDetector};
pub use models::{CartItem, DisplayAttributes, Listing, WishlistItem};
pub use session::{CartSession, Persistence, SessionEvent, SubscriptionId};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
