use std::collections::HashSet;
use std::path::PathBuf;

use thiserror::Error;

use chemsales_core::{DomainError, ProductId};

use crate::product::Product;
use crate::source::ProductSource;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode catalog: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid catalog: {0}")]
    Invalid(#[from] DomainError),
}

/// Read-only, validated product list in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Validate and wrap a product list.
    ///
    /// Every product must pass [`Product::validate`], ids must be unique and
    /// the list must not be empty.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        if products.is_empty() {
            return Err(DomainError::validation("catalog has no products").into());
        }

        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            product.validate()?;
            if !seen.insert(product.id) {
                return Err(
                    DomainError::validation(format!("duplicate product id {}", product.id)).into(),
                );
            }
        }

        Ok(Self { products })
    }

    /// Load from any source and validate.
    pub fn load(source: &dyn ProductSource) -> Result<Self, CatalogError> {
        let products = source.load()?;
        let catalog = Self::new(products)?;
        tracing::info!(
            source = %source.describe(),
            products = catalog.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
