//! Money type for representing currency amounts
//!
//! Amounts are stored as `rust_decimal::Decimal` so sums keep full precision.
//! Rounding to two fraction digits happens only when an amount is rendered,
//! and always through an explicit [`RoundingPolicy`].

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// How a value is rounded to two fraction digits for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingPolicy {
    /// 0.005 -> 0.01, -0.005 -> -0.01
    #[default]
    HalfAwayFromZero,
    /// Banker's rounding: 0.005 -> 0.00, 0.015 -> 0.02
    HalfEven,
}

impl RoundingPolicy {
    fn strategy(self) -> RoundingStrategy {
        match self {
            Self::HalfAwayFromZero => RoundingStrategy::MidpointAwayFromZero,
            Self::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }

    /// Round a value to two fraction digits
    pub fn round(self, value: Decimal) -> Decimal {
        let mut rounded = value.round_dp_with_strategy(2, self.strategy());
        rounded.rescale(2);
        rounded
    }
}

impl FromStr for RoundingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "half-away-from-zero" | "half-up" => Ok(Self::HalfAwayFromZero),
            "half-even" | "bankers" => Ok(Self::HalfEven),
            other => Err(format!("Unknown rounding policy: {}", other)),
        }
    }
}

impl fmt::Display for RoundingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HalfAwayFromZero => write!(f, "half-away-from-zero"),
            Self::HalfEven => write!(f, "half-even"),
        }
    }
}

/// Format a decimal with exactly two fraction digits, no currency symbol
///
/// A value that rounds to zero never carries a minus sign.
pub fn format_fixed(value: Decimal, policy: RoundingPolicy) -> String {
    let rounded = policy.round(value);
    if rounded.is_zero() {
        return "0.00".to_string();
    }
    rounded.to_string()
}

/// A signed monetary amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Largest magnitude a single transaction may carry (10^15)
    ///
    /// Keeps every sum over stored transactions far below `Decimal::MAX`.
    pub const MAX_MAGNITUDE: Money =
        Money(Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0));

    /// Wrap a decimal amount
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create an amount from hundredths of the currency unit
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Create a zero amount
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Get the underlying decimal
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Whether the magnitude stays within [`Money::MAX_MAGNITUDE`]
    pub fn is_within_limit(&self) -> bool {
        self.0.abs() <= Self::MAX_MAGNITUDE.0
    }

    /// Get the absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Parse an amount from user input
    ///
    /// Accepts "10.50", "-10.50", "10", "10,50" (comma decimal separator).
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MoneyParseError::Empty);
        }
        let normalized = trimmed.replace(',', ".");
        Decimal::from_str(&normalized)
            .map(Self)
            .map_err(|_| MoneyParseError::InvalidFormat(trimmed.to_string()))
    }

    /// Two fraction digits, signed, no symbol
    pub fn format_fixed(&self, policy: RoundingPolicy) -> String {
        format_fixed(self.0, policy)
    }

    /// Format with a currency symbol: `€12.50`, `-€12.50`
    pub fn format_with_symbol(&self, symbol: &str, policy: RoundingPolicy) -> String {
        let rounded = policy.round(self.0);
        if rounded.is_sign_negative() && !rounded.is_zero() {
            format!("-{}{}", symbol, format_fixed(rounded.abs(), policy))
        } else {
            format!("{}{}", symbol, format_fixed(rounded.abs(), policy))
        }
    }

    /// Format the magnitude with a currency symbol, ignoring the sign
    pub fn format_magnitude(&self, symbol: &str, policy: RoundingPolicy) -> String {
        format!("{}{}", symbol, format_fixed(self.0.abs(), policy))
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fixed(RoundingPolicy::default()))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    Empty,
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::Empty => write!(f, "Amount is empty"),
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
