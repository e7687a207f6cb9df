//! Price type for catalog amounts.
//!
//! Amounts are currency-agnostic and stored in hundredths of a unit to
//! avoid floating-point drift when filtering and comparing. The backend
//! exchanges them as decimal text (`"4500000.00"`), older payloads as
//! plain JSON numbers; both decode.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error returned when a price cannot be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    #[error("invalid price: {0}")]
    Invalid(String),

    #[error("price cannot be negative: {0}")]
    Negative(String),
}

/// A non-negative amount in hundredths of a currency unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price {
    cents: u64,
}

impl Price {
    /// Create a price from hundredths.
    pub const fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    /// Create a price from whole units. Saturates; decode untrusted input
    /// with [`Price::try_from_units`].
    pub const fn from_units(units: u64) -> Self {
        Self {
            cents: units.saturating_mul(100),
        }
    }

    /// Create a price from whole units, rejecting amounts too large to
    /// represent in hundredths.
    pub fn try_from_units(units: u64) -> Result<Self, PriceError> {
        units
            .checked_mul(100)
            .map(Self::from_cents)
            .ok_or_else(|| PriceError::Invalid(units.to_string()))
    }

    /// Create a price from a decimal amount, rejecting negative or
    /// non-finite input.
    ///
    /// ```
    /// use catalog_types::Price;
    /// let price = Price::from_decimal(49.99).unwrap();
    /// assert_eq!(price.cents(), 4999);
    /// ```
    pub fn from_decimal(amount: f64) -> Result<Self, PriceError> {
        if !amount.is_finite() {
            return Err(PriceError::Invalid(amount.to_string()));
        }
        if amount < 0.0 {
            return Err(PriceError::Negative(amount.to_string()));
        }
        let cents = (amount * 100.0).round();
        if cents >= u64::MAX as f64 {
            return Err(PriceError::Invalid(amount.to_string()));
        }
        Ok(Self { cents: cents as u64 })
    }

    /// Amount in hundredths.
    pub fn cents(&self) -> u64 {
        self.cents
    }

    /// Decimal text with two places, the backend's wire format.
    pub fn to_decimal_string(&self) -> String {
        format!("{}.{:02}", self.cents / 100, self.cents % 100)
    }

    /// Check if this price falls within optional inclusive bounds.
    pub fn within(&self, min: Option<Price>, max: Option<Price>) -> bool {
        min.map_or(true, |min| *self >= min) && max.map_or(true, |max| *self <= max)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let amount: f64 = trimmed
            .parse()
            .map_err(|_| PriceError::Invalid(trimmed.to_string()))?;
        Self::from_decimal(amount)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_decimal_string())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawPrice {
            Integer(u64),
            Float(f64),
            Text(String),
        }

        let parsed = match RawPrice::deserialize(deserializer)? {
            RawPrice::Integer(units) => Price::try_from_units(units),
            RawPrice::Float(amount) => Price::from_decimal(amount),
            RawPrice::Text(text) => text.parse(),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}
