//! Cart controller.
//!
//! This crate contains the cart business rules, implemented purely as
//! deterministic domain logic (no IO, no rendering, no clock).

pub mod cart;
pub mod checkout;
pub mod customer;

pub use cart::{
    AddItem, AdjustQuantity, Cart, CartCommand, CartEvent, CartLine, ItemAdded, ItemRemoved,
    QuantityChanged, RemoveItem,
};
pub use checkout::{CheckoutError, ensure_ready};
pub use customer::{CustomerField, CustomerInfo};
