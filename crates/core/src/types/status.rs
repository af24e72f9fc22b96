//! Listing availability status.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Availability status of a vehicle listing.
///
/// Values come from the remote inventory API and are echoed back unchanged.
/// Only the exact lowercase spellings map to the known variants; anything
/// else, including other casings, survives a round trip through
/// [`ListingStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ListingStatus {
    Available,
    Reserved,
    Sold,
    Other(String),
}

impl ListingStatus {
    /// Wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Available => "available",
            Self::Reserved => "reserved",
            Self::Sold => "sold",
            Self::Other(raw) => raw,
        }
    }

    /// Returns true if the vehicle can still be bought.
    #[must_use]
    pub const fn is_purchasable(&self) -> bool {
        matches!(self, Self::Available)
    }
}

impl From<String> for ListingStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "available" => Self::Available,
            "reserved" => Self::Reserved,
            "sold" => Self::Sold,
            _ => Self::Other(raw),
        }
    }
}

impl From<ListingStatus> for String {
    fn from(status: ListingStatus) -> Self {
        match status {
            ListingStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ListingStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}
