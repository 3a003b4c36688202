//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are held as [`Decimal`] so totals never pick up floating point
//! drift, but they are persisted as plain JSON numbers to stay compatible
//! with the stored cart record (`"price": 19.99`).
//!
//! A JSON number is an `f64`, so a `Price` only ever holds amounts that
//! survive the trip through one: the nearest `f64` must print back as the
//! same decimal. Anything else is rejected at construction instead of being
//! rounded silently on the next save.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors raised when building a price.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PriceError {
    /// The text is not a decimal number.
    #[error("invalid price: {0}")]
    Invalid(String),

    /// The amount has more precision than a stored JSON number can keep.
    #[error("price {0} cannot be stored without losing precision")]
    NotRepresentable(Decimal),

    /// The number is infinite, NaN, or outside the decimal range.
    #[error("price {0} is out of range")]
    OutOfRange(f64),
}

/// Unit price of a product in the store's currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::NotRepresentable` if the amount would change when
    /// written as a JSON number and read back.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        let float = nearest_f64(amount).ok_or(PriceError::NotRepresentable(amount))?;
        match Decimal::from_str(&float.to_string()) {
            Ok(back) if back == amount => Ok(Self(amount)),
            _ => Err(PriceError::NotRepresentable(amount)),
        }
    }

    /// Create a price from an amount in the smallest currency unit.
    ///
    /// Ten significant digits always fit in an `f64`, so this cannot fail.
    #[must_use]
    pub fn from_cents(cents: i32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    /// Get the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format_amount(self.0)
    }
}

/// Format a decimal amount as currency (e.g., "$19.99").
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    format!("${amount:.2}")
}

/// Nearest `f64` to a decimal, using the correctly rounded string parser.
fn nearest_f64(amount: Decimal) -> Option<f64> {
    amount.to_string().parse::<f64>().ok()
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl TryFrom<f64> for Price {
    type Error = PriceError;

    /// Exact decimal form of a JSON number (its shortest round-trip digits).
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(PriceError::OutOfRange(value));
        }

        let amount =
            Decimal::from_str(&value.to_string()).map_err(|_| PriceError::OutOfRange(value))?;
        // Tiny values are rounded to 28 decimal places by the parser
        if nearest_f64(amount) != Some(value) {
            return Err(PriceError::OutOfRange(value));
        }
        Ok(Self(amount))
    }
}

impl FromStr for Price {
    type Err = PriceError;

    /// Parse a decimal amount such as `"19.99"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount =
            Decimal::from_str(s.trim()).map_err(|e| PriceError::Invalid(e.to_string()))?;
        Self::new(amount)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let float = nearest_f64(self.0).ok_or_else(|| {
            <S::Error as serde::ser::Error>::custom(PriceError::NotRepresentable(self.0))
        })?;
        serializer.serialize_f64(float)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Self::try_from(value).map_err(serde::de::Error::custom)
    }
}
