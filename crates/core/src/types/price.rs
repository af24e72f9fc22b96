//! Type-safe price representation using decimal arithmetic.
//!
//! Listing prices are quoted in USD. The storefront also shows a converted
//! amount in the display currency (CNY) using an injected exchange rate that may
//! be stale or missing; see [`to_display_currency`].

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a USD price.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self {
            amount,
            currency_code: CurrencyCode::USD,
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:.2}", self.currency_code.symbol(), self.amount)
    }
}

/// Listing currency (USD) and display currency (CNY).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    CNY,
}

impl CurrencyCode {
    /// Display symbol.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD => "$",
            Self::CNY => "¥",
        }
    }
}

/// An amount converted into the display currency, or the explicit absence of one.
///
/// Consumers render [`DisplayAmount::Unavailable`] as such instead of a
/// misleading zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", content = "amount", rename_all = "snake_case")]
pub enum DisplayAmount {
    /// Whole display-currency units.
    Available(Decimal),
    /// No usable amount or rate.
    Unavailable,
}

impl DisplayAmount {
    /// Returns the converted amount, if any.
    #[must_use]
    pub const fn amount(&self) -> Option<Decimal> {
        match self {
            Self::Available(amount) => Some(*amount),
            Self::Unavailable => None,
        }
    }

    /// Returns true when no amount could be computed.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }
}

impl fmt::Display for DisplayAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available(amount) => write!(f, "{}{amount}", CurrencyCode::CNY.symbol()),
            Self::Unavailable => f.write_str("unavailable"),
        }
    }
}

/// Convert a USD amount into the display currency.
///
/// Returns `round(usd * rate)` (half away from zero, whole units) when both
/// inputs are present and strictly positive, and [`DisplayAmount::Unavailable`]
/// otherwise, including when the product overflows.
///
/// ```
/// use autolot_core::{DisplayAmount, to_display_currency};
/// use rust_decimal::Decimal;
///
/// let rate = Some(Decimal::new(72, 1)); // 7.2
/// assert_eq!(
///     to_display_currency(Some(Decimal::from(100)), rate),
///     DisplayAmount::Available(Decimal::from(720)),
/// );
/// assert!(to_display_currency(Some(Decimal::from(100)), None).is_unavailable());
/// ```
#[must_use]
pub fn to_display_currency(usd: Option<Decimal>, rate: Option<Decimal>) -> DisplayAmount {
    let (Some(usd), Some(rate)) = (usd, rate) else {
        return DisplayAmount::Unavailable;
    };
    if usd <= Decimal::ZERO || rate <= Decimal::ZERO {
        return DisplayAmount::Unavailable;
    }
    usd.checked_mul(rate).map_or(DisplayAmount::Unavailable, |product| {
        DisplayAmount::Available(
            product.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
        )
    })
}
