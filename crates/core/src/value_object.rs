//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: `Money`,
/// `Quantity` and customer details are values, while catalog products are
/// entities (see [`crate::Entity`]).
///
/// To "modify" a value object, build a new one:
///
/// ```
/// use chemsales_core::{Money, ValueObject};
///
/// fn assert_value<T: ValueObject>(_: &T) {}
///
/// let price = Money::from_major(180);
/// let doubled = price.checked_add(price).unwrap();
/// assert_value(&doubled);
/// assert_eq!(doubled, Money::from_cents(36_000));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
