//! Currency amounts in integer minor units.

use core::str::FromStr;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{format_grouped, parse_scaled, round_to_i64};
use crate::error::DomainError;
use crate::quantity::Quantity;
use crate::value_object::ValueObject;

/// A currency amount in cents.
///
/// Arithmetic is checked and exact; decimal strings only appear when parsing
/// configuration or formatting for display.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Money(i64);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Whole currency units (e.g. dollars).
    pub const fn from_major(units: i64) -> Self {
        Self(units * 100)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Price of `quantity` units at `self` per unit, rounded half away from
    /// zero to the cent.
    pub fn checked_mul_quantity(self, quantity: Quantity) -> Option<Money> {
        let exact = self.to_decimal().checked_mul(quantity.to_decimal())?;
        round_to_i64(exact).map(Money)
    }

    /// `self × basis_points / 10_000`, rounded half away from zero to the cent.
    pub fn checked_apply_rate(self, basis_points: u32) -> Option<Money> {
        let rate = Decimal::new(i64::from(basis_points), 4);
        let exact = self.to_decimal().checked_mul(rate)?;
        round_to_i64(exact).map(Money)
    }

    /// `$1,075.00`: grouped, always two decimals.
    pub fn to_fixed_string(self) -> String {
        self.render(Some(2))
    }

    /// `$900`, `$362.5`: grouped, trailing zero decimals dropped.
    pub fn to_compact_string(self) -> String {
        self.render(None)
    }

    fn render(self, fixed: Option<usize>) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let digits = format_grouped(self.to_decimal().abs(), fixed);
        format!("{sign}${digits}")
    }

    /// Whole cents as a decimal amount of currency units.
    fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, 2)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_fixed_string())
    }
}

impl FromStr for Money {
    type Err = DomainError;

    /// Accepts plain decimals with an optional leading `$` (`"2850"`,
    /// `"$1450.50"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed);
        let cents = parse_scaled(trimmed, 2)
            .map_err(|e| DomainError::validation(format!("invalid amount: {e}")))?;
        i64::try_from(cents)
            .map(Money)
            .map_err(|_| DomainError::validation(format!("amount out of range: {s:?}")))
    }
}

impl TryFrom<String> for Money {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Money> for String {
    fn from(value: Money) -> Self {
        value.to_decimal().normalize().to_string()
    }
}
