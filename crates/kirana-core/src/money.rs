//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The backend speaks rupee floats, and floats drift:                     │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    Every amount is converted to integer paise at the wire boundary      │
//! │    and stays integer until it is serialized back out.                   │
//! │                                                                         │
//! │  The backend's "±0.01 tolerance" checks become exact one-paisa          │
//! │  comparisons on this side.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! `Money` serializes as an `f64` rupee amount because that is what the
//! backend sends and expects. Deserialization rounds half-away-from-zero to
//! the nearest paisa.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in integer paise (1/100 rupee).
///
/// ## Design Decisions
/// - **i64 (signed)**: Ledger balances are signed; a negative customer
///   balance means the customer owes the business ("dues").
/// - **Single field tuple struct**: Zero-cost abstraction over i64.
/// - **Wire serde as f64 rupees**: The backend contract is float rupees;
///   the conversion happens in exactly one place (here).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Parses a float rupee amount from the wire into paise.
    ///
    /// Rounds half away from zero, so `10.005` → `1001` paise and
    /// `-10.005` → `-1001` paise. Only wire deserialization and user
    /// free-form amount entry should ever call this.
    pub fn from_rupees_f64(rupees: f64) -> Self {
        Money((rupees * 100.0).round() as i64)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the value as float rupees, for the wire only.
    #[inline]
    pub fn as_rupees_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    ///
    /// Used for full settlement: paying off a balance of −₹500 means
    /// paying exactly `abs(balance)` = ₹500.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies by a quantity (line totals).
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Saturating subtraction clamped at zero.
    ///
    /// Remaining balance on an over-paid document is zero, never negative.
    #[inline]
    pub const fn saturating_remaining(&self, paid: Money) -> Self {
        let rem = self.0 - paid.0;
        if rem < 0 {
            Money(0)
        } else {
            Money(rem)
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Wire format: float rupees.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_rupees_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rupees = f64::deserialize(deserializer)?;
        Ok(Money::from_rupees_f64(rupees))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paise() {
        let money = Money::from_paise(1099);
        assert_eq!(money.paise(), 1099);
    }

    #[test]
    fn test_wire_round_trip() {
        let money = Money::from_rupees_f64(1500.75);
        assert_eq!(money.paise(), 150075);

        let json = serde_json::to_string(&money).unwrap();
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, money);
    }

    #[test]
    fn test_float_drift_is_absorbed() {
        // 0.1 + 0.2 style drift from the backend must land on exact paise
        let money = Money::from_rupees_f64(0.30000000000000004);
        assert_eq!(money.paise(), 30);
    }

    #[test]
    fn test_negative_parse() {
        let dues = Money::from_rupees_f64(-550.50);
        assert_eq!(dues.paise(), -55050);
        assert!(dues.is_negative());
        assert_eq!(dues.abs().paise(), 55050);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_paise(1099)), "₹10.99");
        assert_eq!(format!("{}", Money::from_paise(500)), "₹5.00");
        assert_eq!(format!("{}", Money::from_paise(-550)), "-₹5.50");
        assert_eq!(format!("{}", Money::from_paise(0)), "₹0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_paise(1000);
        let b = Money::from_paise(500);

        assert_eq!((a + b).paise(), 1500);
        assert_eq!((a - b).paise(), 500);
        assert_eq!((-a).paise(), -1000);
        assert_eq!(a.multiply_quantity(3).paise(), 3000);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 200, 300].iter().map(|p| Money::from_paise(*p)).sum();
        assert_eq!(total.paise(), 600);
    }

    #[test]
    fn test_saturating_remaining() {
        let total = Money::from_paise(50000);
        assert_eq!(total.saturating_remaining(Money::from_paise(30000)).paise(), 20000);
        assert_eq!(total.saturating_remaining(Money::from_paise(60000)).paise(), 0);
    }
}
