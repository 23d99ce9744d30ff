//! Receipt preconditions.

use thiserror::Error;

use crate::cart::Cart;
use crate::customer::{CustomerField, CustomerInfo};

/// Blocking notification shown when a receipt cannot be generated.
///
/// The display text is the user-facing message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Your cart is empty!")]
    EmptyCart,

    #[error("Please fill in all customer information fields.")]
    MissingCustomerInfo { missing: Vec<CustomerField> },
}

/// Check that a receipt can be generated: the cart has lines and name,
/// company and email are filled in. An empty cart is reported first.
pub fn ensure_ready(cart: &Cart, customer: &CustomerInfo) -> Result<(), CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let missing = customer.missing_required();
    if !missing.is_empty() {
        return Err(CheckoutError::MissingCustomerInfo { missing });
    }

    Ok(())
}
