//! Type-safe price representation using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount.
///
/// Wraps [`Decimal`] so prices never pass through binary floating point on
/// the client side. The backend serializes prices as plain JSON numbers;
/// the `serde-float` feature of `rust_decimal` matches that wire format.
/// The client never computes cart totals from line prices - the server
/// total is authoritative - so no arithmetic beyond display is exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a new price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display with two decimal places (e.g., "59.90").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{:.2}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl std::str::FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Decimal>().map(Self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_places() {
        let price: Price = "59.9".parse().unwrap();
        assert_eq!(price.display(), "59.90");
        assert_eq!(price.to_string(), "59.90");
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        assert!("abc".parse::<Price>().is_err());
    }

    #[test]
    fn test_deserialize_from_json_number() {
        let price: Price = serde_json::from_str("199.99").unwrap();
        assert_eq!(price.display(), "199.99");
    }
}
