//! Autolot Core - Shared types library.
//!
//! This crate provides common types used across all Autolot components:
//! - `storefront` - Cart and wishlist session manager
//! - `cli` - Command-line driver for the session manager
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no storage
//! access, no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Type-safe ids, shopper identity, prices and listing statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
