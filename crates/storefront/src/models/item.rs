//! Cart and wishlist item types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use autolot_core::{ListingId, ListingStatus};

/// Keys owned by the item itself, never echoed as display data.
const RESERVED_KEYS: [&str; 3] = ["id", "quantity", "price"];

/// Display data copied from a listing when it is added.
///
/// The session never interprets these values; it stores and echoes them as
/// received. The typed accessors are lenient views for rendering and return
/// `None` when a value is absent or has an unexpected shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayAttributes(Map<String, Value>);

impl DisplayAttributes {
    /// Create an empty attribute set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set one attribute. Reserved keys are ignored.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if !RESERVED_KEYS.contains(&key.as_str()) {
            self.0.insert(key, value.into());
        }
        self
    }

    /// Raw value of an attribute.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Number of attributes held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no attributes are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.get("title").and_then(Value::as_str)
    }

    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.get("image").and_then(Value::as_str)
    }

    #[must_use]
    pub fn fuel(&self) -> Option<&str> {
        self.get("fuel").and_then(Value::as_str)
    }

    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.get("color").and_then(Value::as_str)
    }

    /// Model year, read from a number or a numeric string.
    #[must_use]
    pub fn year(&self) -> Option<u16> {
        self.get("year").and_then(lenient_uint)
    }

    /// Seat count, read from a number or a numeric string.
    #[must_use]
    pub fn seats(&self) -> Option<u8> {
        self.get("seats").and_then(lenient_uint)
    }

    #[must_use]
    pub fn status(&self) -> Option<ListingStatus> {
        self.get("status")
            .and_then(Value::as_str)
            .map(|raw| ListingStatus::from(raw.to_string()))
    }

    /// Copy without the keys the item serializes itself.
    fn without_reserved(&self) -> Self {
        let mut attributes = self.clone();
        for key in RESERVED_KEYS {
            attributes.0.remove(key);
        }
        attributes
    }
}

fn lenient_uint<T: TryFrom<u64>>(value: &Value) -> Option<T> {
    let raw = match value {
        Value::Number(number) => number.as_u64()?,
        Value::String(text) => text.trim().parse().ok()?,
        _ => return None,
    };
    T::try_from(raw).ok()
}

/// A vehicle listing as received from the inventory API.
///
/// The id is unvalidated; the session rejects listings whose id does not
/// parse as a [`ListingId`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    /// Unit price in USD.
    pub price: Decimal,
    #[serde(flatten)]
    pub attributes: DisplayAttributes,
}

impl Listing {
    /// Create a listing with no display attributes.
    pub fn new(id: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            price,
            attributes: DisplayAttributes::default(),
        }
    }

    /// Builder method to attach display attributes.
    #[must_use]
    pub fn with_attributes(mut self, attributes: DisplayAttributes) -> Self {
        self.attributes = attributes;
        self
    }
}

/// A line in the cart.
///
/// `quantity` is at least 1 for every item held by a session; a line that
/// would drop to zero is removed instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ListingId,
    pub quantity: u32,
    /// Unit price in USD captured when the item was added.
    pub price: Decimal,
    #[serde(flatten)]
    pub attributes: DisplayAttributes,
}

impl CartItem {
    /// Snapshot a listing into a cart line.
    #[must_use]
    pub fn from_listing(id: ListingId, listing: &Listing, quantity: u32) -> Self {
        Self {
            id,
            quantity,
            price: listing.price,
            attributes: listing.attributes.without_reserved(),
        }
    }

    /// `price * quantity`, saturating at [`Decimal::MAX`].
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// A wishlist entry. Membership is binary, so there is no quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub id: ListingId,
    /// Unit price in USD captured when the item was added.
    pub price: Decimal,
    #[serde(flatten)]
    pub attributes: DisplayAttributes,
}

impl WishlistItem {
    /// Snapshot a listing into a wishlist entry.
    #[must_use]
    pub fn from_listing(id: ListingId, listing: &Listing) -> Self {
        Self {
            id,
            price: listing.price,
            attributes: listing.attributes.without_reserved(),
        }
    }
}
