use serde::{Deserialize, Serialize};

use chemsales_core::{DomainError, DomainResult, Entity, Money, ProductId, Quantity, QuantityDelta};

/// A catalog product.
///
/// Products are immutable once loaded. The minimum order quantity doubles as
/// the step used when adding to or adjusting a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Free-text grouping tag (e.g. "Pigments").
    pub category: String,
    pub description: String,
    /// Price per unit in smallest currency unit.
    pub unit_price: Money,
    /// Pricing unit label shown next to the price (e.g. "per ton").
    pub unit: String,
    /// Label shown after quantities (e.g. "tons").
    #[serde(default = "default_quantity_unit")]
    pub quantity_unit: String,
    pub min_order: Quantity,
    /// Display glyph for the product card.
    #[serde(default)]
    pub glyph: String,
}

fn default_quantity_unit() -> String {
    "units".to_string()
}

impl Product {
    /// Step applied by the `+`/`-` controls: one minimum order.
    pub fn step(&self) -> DomainResult<QuantityDelta> {
        self.min_order.as_delta().ok_or_else(|| {
            DomainError::invariant(format!("min_order of product {} too large", self.id))
        })
    }

    /// Check the per-product rules enforced when a catalog is loaded.
    pub fn validate(&self) -> DomainResult<()> {
        if self.id.get() == 0 {
            return Err(DomainError::validation("product id must be positive"));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "product {}: name cannot be empty",
                self.id
            )));
        }
        if self.unit_price.is_negative() {
            return Err(DomainError::validation(format!(
                "product {}: unit_price cannot be negative",
                self.id
            )));
        }
        if self.min_order.is_zero() {
            return Err(DomainError::validation(format!(
                "product {}: min_order must be positive",
                self.id
            )));
        }
        self.step().map(|_| ())
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
