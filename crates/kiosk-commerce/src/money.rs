//! Money type for prices, costs and cart totals.
//!
//! Uses a cents-based integer representation so that line totals and cart
//! sums never accumulate floating-point error. The store works in a single
//! currency, so no currency code is carried.
//!
//! On the wire (document store, fixtures) amounts are plain decimal numbers,
//! e.g. `1250.5`.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};

/// Display symbol for amounts.
pub const SYMBOL: &str = "$";

/// Number of decimal places kept.
pub const DECIMAL_PLACES: u32 = 2;

const CENTS_PER_UNIT: i64 = 10_i64.pow(DECIMAL_PLACES);

/// A monetary amount stored in cents.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(try_from = "f64", into = "f64")]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: i64,
}

impl Money {
    /// Zero amount.
    pub const ZERO: Money = Money { amount_cents: 0 };

    /// Create a new amount from cents.
    pub const fn new(amount_cents: i64) -> Self {
        Self { amount_cents }
    }

    /// Create an amount from a decimal value, rounding to the nearest cent.
    ///
    /// ```
    /// use kiosk_commerce::money::Money;
    /// let price = Money::from_decimal(49.99);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        Self::new((amount * CENTS_PER_UNIT as f64).round() as i64)
    }

    /// Parse user input such as `"12.50"` or `"1200"`.
    ///
    /// Leading and trailing whitespace is ignored. Non-numeric, non-finite and
    /// negative input is rejected.
    pub fn parse(input: &str) -> Result<Self, CommerceError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CommerceError::InvalidAmount(input.to_string()));
        }

        let value: f64 = trimmed
            .parse()
            .map_err(|_| CommerceError::InvalidAmount(input.to_string()))?;

        if !value.is_finite() {
            return Err(CommerceError::InvalidAmount(input.to_string()));
        }
        if value < 0.0 {
            return Err(CommerceError::NegativeAmount(trimmed.to_string()));
        }

        Ok(Self::from_decimal(value))
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / CENTS_PER_UNIT as f64
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        format!("{}{}", SYMBOL, self.display_amount())
    }

    /// Format without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let places = DECIMAL_PLACES as usize;
        format!("{:.places$}", self.to_decimal())
    }

    /// Multiply by a quantity, saturating at the numeric bounds.
    pub fn multiply(&self, factor: u32) -> Money {
        Money::new(self.amount_cents.saturating_mul(i64::from(factor)))
    }

    /// Add another amount, saturating at the numeric bounds.
    pub fn saturating_add(&self, other: Money) -> Money {
        Money::new(self.amount_cents.saturating_add(other.amount_cents))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        self.saturating_add(other)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money::new(self.amount_cents.saturating_sub(other.amount_cents))
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, factor: u32) -> Money {
        self.multiply(factor)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl TryFrom<f64> for Money {
    type Error = CommerceError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(CommerceError::InvalidAmount(value.to_string()));
        }
        if value < 0.0 {
            return Err(CommerceError::NegativeAmount(value.to_string()));
        }
        Ok(Money::from_decimal(value))
    }
}

impl From<Money> for f64 {
    fn from(money: Money) -> f64 {
        money.to_decimal()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
