//! Core types for Autolot.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod identity;
pub mod price;
pub mod status;

pub use id::*;
pub use identity::Identity;
pub use price::{CurrencyCode, DisplayAmount, Price, to_display_currency};
pub use status::ListingStatus;
