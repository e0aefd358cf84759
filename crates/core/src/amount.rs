//! Amount - Non-negative value held by or sent from the wallet
//!
//! Negative values are rejected at construction, so every `Amount`
//! in the system is >= 0.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur when working with amounts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("Amount cannot be negative: {0}")]
    Negative(Decimal),

    #[error("Amount overflow")]
    Overflow,
}

/// A non-negative decimal value.
///
/// # Example
/// ```
/// use multisig_core::Amount;
/// use rust_decimal::Decimal;
///
/// let amount = Amount::new(Decimal::new(250, 2)).unwrap();
/// assert_eq!(amount.to_string(), "2.50");
/// assert!(Amount::new(Decimal::new(-1, 0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new Amount, rejecting negative values
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(AmountError::Negative(value));
        }
        Ok(Self(value))
    }

    /// Whole units, always valid
    pub fn from_units(units: u64) -> Self {
        Self(Decimal::from(units))
    }

    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Sum, or `None` on decimal overflow
    pub fn checked_add(&self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    /// Difference, or `None` if the result would be negative
    pub fn checked_sub(&self, other: Amount) -> Option<Amount> {
        if other.0 > self.0 {
            return None;
        }
        self.0.checked_sub(other.0).map(Amount)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_negative_rejected() {
        assert_eq!(Amount::new(dec!(-0.01)), Err(AmountError::Negative(dec!(-0.01))));
    }

    #[test]
    fn test_zero_is_valid() {
        assert!(Amount::new(dec!(0)).unwrap().is_zero());
        assert_eq!(Amount::default(), Amount::ZERO);
    }

    #[test]
    fn test_checked_sub_never_negative() {
        let five = Amount::from_units(5);
        let three = Amount::from_units(3);
        assert_eq!(five.checked_sub(three), Some(Amount::from_units(2)));
        assert_eq!(three.checked_sub(five), None);
        assert_eq!(five.checked_sub(five), Some(Amount::ZERO));
    }

    #[test]
    fn test_checked_add() {
        let sum = Amount::new(dec!(1.5)).unwrap().checked_add(Amount::from_units(2));
        assert_eq!(sum.map(|a| a.value()), Some(dec!(3.5)));
        assert_eq!(Amount::new(Decimal::MAX).unwrap().checked_add(Amount::from_units(1)), None);
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        let parsed: Result<Amount, _> = serde_json::from_str("\"-4\"");
        assert!(parsed.is_err());

        let parsed: Amount = serde_json::from_str("\"12.25\"").unwrap();
        assert_eq!(parsed.value(), dec!(12.25));
    }
}
