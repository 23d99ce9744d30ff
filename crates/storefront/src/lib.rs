//! `chemsales-storefront`: the interactive sales counter.
//!
//! Owns the page state (catalog, cart, customer details, which overlay is
//! showing) and drives it from a line-oriented terminal session.

pub mod command;
pub mod config;
pub mod render;
pub mod session;
pub mod state;

pub use command::Action;
pub use config::{CliArgs, StorefrontConfig};
pub use state::{Storefront, StorefrontError, ViewState};
