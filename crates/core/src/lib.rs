//! `chemsales-core`: domain building blocks shared by the catalog, cart and
//! invoicing crates.
//!
//! This crate contains **pure domain** primitives (no IO, no rendering).

pub mod aggregate;
mod decimal;
pub mod entity;
pub mod error;
pub mod event;
pub mod id;
pub mod money;
pub mod quantity;
pub mod value_object;

pub use aggregate::Aggregate;
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use event::Event;
pub use id::{ProductId, SessionId};
pub use money::Money;
pub use quantity::{Quantity, QuantityDelta};
pub use value_object::ValueObject;
