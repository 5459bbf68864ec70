//! Quantity of a line item
//!
//! Quantities come from spreadsheets and may be fractional (hours, litres),
//! so they are stored as `f64`. A valid quantity is finite and positive.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(f64);

impl Quantity {
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Whether this quantity can be accepted on a line item
    pub fn is_valid(&self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }

    /// Parse a quantity, accepting `,` as the decimal separator
    pub fn parse(s: &str) -> Result<Self, QuantityParseError> {
        let normalized = s.trim().replace(',', ".");
        normalized
            .parse::<f64>()
            .map(Self)
            .map_err(|_| QuantityParseError(s.to_string()))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self(1.0)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 && self.0.abs() < 1e15 {
            write!(f, "{}", self.0 as i64)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityParseError(pub String);

impl fmt::Display for QuantityParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid quantity: {}", self.0)
    }
}

impl std::error::Error for QuantityParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity() {
        assert!(Quantity::new(2.0).is_valid());
        assert!(Quantity::new(0.25).is_valid());
        assert!(!Quantity::new(0.0).is_valid());
        assert!(!Quantity::new(-1.0).is_valid());
        assert!(!Quantity::new(f64::NAN).is_valid());
        assert!(!Quantity::new(f64::INFINITY).is_valid());
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(Quantity::parse("2").unwrap(), Quantity::new(2.0));
        assert_eq!(Quantity::parse("1,5").unwrap(), Quantity::new(1.5));
        assert!(Quantity::parse("two").is_err());
        assert_eq!(Quantity::new(3.0).to_string(), "3");
        assert_eq!(Quantity::new(1.5).to_string(), "1.5");
    }
}
