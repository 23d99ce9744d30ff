//! Order quantities in thousandths of the product's unit.

use core::str::FromStr;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::parse_scaled;
use crate::error::DomainError;
use crate::value_object::ValueObject;

/// A non-negative amount of product, stored in thousandths of its unit
/// (`0.25 t` is `250`).
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Quantity(u64);

impl ValueObject for Quantity {}

/// A signed change applied to a [`Quantity`], in thousandths.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuantityDelta(i64);

impl ValueObject for QuantityDelta {}

impl Quantity {
    pub const ZERO: Quantity = Quantity(0);

    /// Thousandths per whole unit.
    pub const SCALE_FACTOR: u64 = 1_000;

    const SCALE: u32 = 3;

    pub const fn from_thousandths(thousandths: u64) -> Self {
        Self(thousandths)
    }

    pub const fn from_whole(units: u64) -> Self {
        Self(units * Self::SCALE_FACTOR)
    }

    pub const fn thousandths(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Quantity) -> Option<Quantity> {
        self.0.checked_add(other.0).map(Quantity)
    }

    /// `max(floor, self + delta)`. `None` when the sum does not fit.
    pub fn offset_clamped(self, delta: QuantityDelta, floor: Quantity) -> Option<Quantity> {
        let raw = i128::from(self.0) + i128::from(delta.0);
        let clamped = raw.max(i128::from(floor.0));
        u64::try_from(clamped).ok().map(Quantity)
    }

    /// Exact value in whole units.
    pub(crate) fn to_decimal(self) -> Decimal {
        Decimal::from_i128_with_scale(i128::from(self.0), Self::SCALE)
    }

    /// This quantity as a positive step. `None` above `i64::MAX` thousandths.
    pub fn as_delta(self) -> Option<QuantityDelta> {
        i64::try_from(self.0).ok().map(QuantityDelta)
    }
}

impl QuantityDelta {
    pub const fn from_thousandths(thousandths: i64) -> Self {
        Self(thousandths)
    }

    pub const fn thousandths(self) -> i64 {
        self.0
    }
}

impl core::ops::Neg for QuantityDelta {
    type Output = QuantityDelta;

    fn neg(self) -> Self::Output {
        QuantityDelta(self.0.saturating_neg())
    }
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.to_decimal().normalize(), f)
    }
}

impl core::fmt::Display for QuantityDelta {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "+" };
        let digits = Decimal::new(self.0, Quantity::SCALE).abs().normalize();
        write!(f, "{sign}{digits}")
    }
}

impl FromStr for Quantity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let scaled = parse_scaled(s, Self::SCALE)
            .map_err(|e| DomainError::validation(format!("invalid quantity: {e}")))?;
        u64::try_from(scaled)
            .map(Quantity)
            .map_err(|_| DomainError::validation(format!("quantity must not be negative: {s:?}")))
    }
}

impl TryFrom<String> for Quantity {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Quantity> for String {
    fn from(value: Quantity) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn displays_without_trailing_zeros() {
        assert_eq!(Quantity::from_thousandths(250).to_string(), "0.25");
        assert_eq!(Quantity::from_thousandths(200).to_string(), "0.2");
        assert_eq!(Quantity::from_whole(10).to_string(), "10");
        assert_eq!(QuantityDelta::from_thousandths(-500).to_string(), "-0.5");
    }

    #[test]
    fn parses_decimal_strings() {
        assert_eq!("0.25".parse::<Quantity>().unwrap(), Quantity::from_thousandths(250));
        assert_eq!("5".parse::<Quantity>().unwrap(), Quantity::from_whole(5));
        assert!("-1".parse::<Quantity>().is_err());
        assert!("0.0001".parse::<Quantity>().is_err());
    }

    #[test]
    fn offset_clamps_to_floor() {
        let floor = Quantity::from_whole(5);
        let qty = Quantity::from_whole(10);
        assert_eq!(
            qty.offset_clamped(QuantityDelta::from_thousandths(-5_000), floor),
            Some(Quantity::from_whole(5))
        );
        assert_eq!(
            qty.offset_clamped(QuantityDelta::from_thousandths(i64::MIN), floor),
            Some(floor)
        );
    }

    #[test]
    fn offset_reports_overflow() {
        let qty = Quantity::from_thousandths(u64::MAX);
        assert_eq!(
            qty.offset_clamped(QuantityDelta::from_thousandths(1), Quantity::ZERO),
            None
        );
    }

    proptest! {
        /// Property: the result of a clamped offset never falls below the floor.
        #[test]
        fn offset_never_below_floor(
            start in 0u64..1_000_000_000,
            floor in 1u64..1_000_000,
            delta in any::<i64>(),
        ) {
            let floor_qty = Quantity::from_thousandths(floor);
            let result = Quantity::from_thousandths(start)
                .offset_clamped(QuantityDelta::from_thousandths(delta), floor_qty);
            if let Some(q) = result {
                prop_assert!(q.thousandths() >= floor);
            }
        }
    }
}
