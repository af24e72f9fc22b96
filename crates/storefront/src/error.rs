//! Session error type.
//!
//! Mutators only fail when handed input they refuse to store. Storage problems
//! are not errors: a failed read hydrates as empty and a failed write is
//! reported through [`Persistence::Failed`](crate::session::Persistence).

use thiserror::Error;

use autolot_core::IdError;

/// Errors returned by [`CartSession`](crate::CartSession) mutators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The listing or id argument does not carry a usable id. Nothing changed.
    #[error("invalid listing id {raw:?}: {source}")]
    InvalidListingId {
        /// The rejected input.
        raw: String,
        /// Why it was rejected.
        #[source]
        source: IdError,
    },
}

/// Result type alias for `SessionError`.
pub type Result<T> = std::result::Result<T, SessionError>;
