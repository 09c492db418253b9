//! Type-safe price representation using decimal arithmetic.
//!
//! The backend quotes every amount in Indian rupees, so [`Price`] carries the
//! amount alone and formats with the store's `Rs.` prefix. There is no
//! currency conversion anywhere in this system; [`CurrencyCode`] exists only
//! to name the unit on payment-gateway payloads.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price in rupees.
///
/// Wraps [`Decimal`] so money never passes through floating point. Wire
/// representation is transparent: the backend sends plain JSON numbers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// A zero price.
    #[must_use]
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Create a price from a whole number of rupees.
    #[must_use]
    pub fn from_rupees(rupees: i64) -> Self {
        Self(Decimal::from(rupees))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Round to the nearest whole rupee, halves away from zero.
    ///
    /// Matches the backend's tax computation, which rounds with JavaScript's
    /// `Math.round` semantics for non-negative amounts.
    #[must_use]
    pub fn round_to_rupee(&self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rs.{}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

/// ISO 4217 currency codes accepted by the payment gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    INR,
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::INR => write!(f, "INR"),
        }
    }
}
