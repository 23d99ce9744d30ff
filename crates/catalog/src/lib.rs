//! Product catalog.
//!
//! The catalog is read-only configuration: loaded once at startup from a
//! [`ProductSource`] and never mutated afterwards. Cart logic only ever sees
//! `&Product`, so swapping the source does not touch it.

pub mod catalog;
pub mod product;
pub mod source;

pub use catalog::{Catalog, CatalogError};
pub use product::Product;
pub use source::{BuiltinProducts, JsonFileProducts, ProductSource};
