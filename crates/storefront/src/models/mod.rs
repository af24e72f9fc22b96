//! Domain models for the cart and wishlist.
//!
//! [`Listing`] is what consumers hand to the session: a raw listing from the
//! remote inventory API whose id has not been validated yet. [`CartItem`] and
//! [`WishlistItem`] are what the session stores; their ids are validated and
//! their display attributes are an opaque snapshot taken when they were added.

mod item;

pub use item::{CartItem, DisplayAttributes, Listing, WishlistItem};
