//! Versioned JSON envelope for stored collections.
//!
//! Collections are written as
//!
//! ```json
//! {"version": 1, "saved_at": "2026-01-01T00:00:00Z", "items": [ ... ]}
//! ```
//!
//! Older data written as a bare JSON array is read as version 0. A value that
//! fails to decode as a whole is reported to the caller, which treats it as an
//! empty collection and leaves the stored value alone. A single unreadable
//! item inside an otherwise readable collection is skipped with a warning so
//! the rest of the collection survives.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

/// Envelope version written by this crate.
pub const SCHEMA_VERSION: u32 = 1;

/// Reasons a stored value could not be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The value is not valid JSON or not a collection.
    #[error("malformed stored collection: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The value was written by a newer schema.
    #[error("unsupported stored collection version {0}")]
    UnsupportedVersion(u32),
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    saved_at: DateTime<Utc>,
    items: &'a [T],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Stored {
    Versioned { version: u32, items: Vec<Value> },
    Legacy(Vec<Value>),
}

/// Serialize `items` into the current envelope.
///
/// # Errors
///
/// Returns an error if an item cannot be serialized.
pub fn encode<T: Serialize>(items: &[T]) -> Result<String, serde_json::Error> {
    encode_at(items, Utc::now())
}

fn encode_at<T: Serialize>(items: &[T], saved_at: DateTime<Utc>) -> Result<String, serde_json::Error> {
    serde_json::to_string(&EnvelopeRef {
        version: SCHEMA_VERSION,
        saved_at,
        items,
    })
}

/// Decode a stored value in either the current or the legacy layout.
///
/// Items that do not decode as `T` are dropped and logged.
///
/// # Errors
///
/// Returns [`DecodeError`] if the value is malformed or from a newer schema.
pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>, DecodeError> {
    let items = match serde_json::from_str::<Stored>(raw)? {
        Stored::Versioned { version, items } if version <= SCHEMA_VERSION => items,
        Stored::Versioned { version, .. } => return Err(DecodeError::UnsupportedVersion(version)),
        Stored::Legacy(items) => items,
    };
    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            serde_json::from_value(item)
                .inspect_err(|error| warn!(index, error = %error, "skipping unreadable stored item"))
                .ok()
        })
        .collect())
}
