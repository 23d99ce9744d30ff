//! Where catalog products come from.

use std::path::{Path, PathBuf};

use chemsales_core::{Money, ProductId, Quantity};

use crate::catalog::CatalogError;
use crate::product::Product;

/// A provider of raw (not yet validated) catalog products.
pub trait ProductSource {
    fn load(&self) -> Result<Vec<Product>, CatalogError>;

    /// Short human-readable description for logs.
    fn describe(&self) -> String;
}

/// The price list shipped with the storefront.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinProducts;

impl ProductSource for BuiltinProducts {
    fn load(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(builtin_products())
    }

    fn describe(&self) -> String {
        "builtin".to_string()
    }
}

/// A JSON array of products on disk.
#[derive(Debug, Clone)]
pub struct JsonFileProducts {
    path: PathBuf,
}

impl JsonFileProducts {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProductSource for JsonFileProducts {
    fn load(&self) -> Result<Vec<Product>, CatalogError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|source| CatalogError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

fn ton_product(
    id: u32,
    name: &str,
    category: &str,
    description: &str,
    price: i64,
    min_order_thousandths: u64,
    glyph: &str,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        unit_price: Money::from_major(price),
        unit: "per ton".to_string(),
        quantity_unit: "tons".to_string(),
        min_order: Quantity::from_thousandths(min_order_thousandths),
        glyph: glyph.to_string(),
    }
}

fn builtin_products() -> Vec<Product> {
    vec![
        ton_product(
            1,
            "Titanium Dioxide (Rutile Grade)",
            "Pigments",
            "High-quality white pigment with excellent opacity and brightness. Ideal for all paint formulations.",
            2850,
            1_000,
            "🎨",
        ),
        ton_product(
            2,
            "Acrylic Resin (Emulsion)",
            "Resins",
            "Water-based acrylic emulsion for interior and exterior paints. Excellent durability and adhesion.",
            3200,
            500,
            "💧",
        ),
        ton_product(
            3,
            "Iron Oxide Red",
            "Pigments",
            "Synthetic iron oxide pigment offering excellent color strength and weather resistance.",
            1450,
            250,
            "🔴",
        ),
        ton_product(
            4,
            "Calcium Carbonate",
            "Fillers",
            "Ground calcium carbonate extender for cost-effective paint formulations.",
            180,
            5_000,
            "⚪",
        ),
        ton_product(
            5,
            "Butyl Glycol",
            "Solvents",
            "Coalescing solvent for water-based paints. Improves film formation and flow.",
            1850,
            200,
            "🧪",
        ),
        ton_product(
            6,
            "Dispersing Agent",
            "Additives",
            "High-performance dispersant for pigment grinding. Reduces viscosity and improves stability.",
            4200,
            100,
            "⚗️",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::catalog::Catalog;
    use chemsales_core::DomainError;

    fn catalog_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_catalog_from_json_file() {
        let file = catalog_file(
            r#"[
                {"id": 7, "name": "Zinc Phosphate", "category": "Pigments",
                 "description": "Anticorrosive pigment.", "unit_price": "2100.50",
                 "unit": "per ton", "quantity_unit": "tons", "min_order": "0.5", "glyph": "Z"},
                {"id": 8, "name": "Defoamer", "category": "Additives",
                 "description": "", "unit_price": "950", "unit": "per drum",
                 "min_order": "2"}
            ]"#,
        );
        let source = JsonFileProducts::new(file.path());

        let catalog = Catalog::load(&source).unwrap();
        assert_eq!(catalog.len(), 2);
        let zinc = catalog.get(ProductId::new(7)).unwrap();
        assert_eq!(zinc.unit_price, Money::from_cents(210_050));
        assert_eq!(zinc.min_order, Quantity::from_thousandths(500));
        let defoamer = catalog.get(ProductId::new(8)).unwrap();
        assert_eq!(defoamer.quantity_unit, "units");
        assert_eq!(source.describe(), file.path().display().to_string());
    }

    #[test]
    fn malformed_json_file_is_a_decode_error() {
        let file = catalog_file("{not json");
        assert!(matches!(
            JsonFileProducts::new(file.path()).load(),
            Err(CatalogError::Decode(_))
        ));
    }

    #[test]
    fn invalid_products_in_file_are_rejected_on_load() {
        let file = catalog_file(
            r#"[{"id": 1, "name": "Resin", "category": "Resins", "description": "",
                 "unit_price": "100", "unit": "per ton", "min_order": "0"}]"#,
        );
        match Catalog::load(&JsonFileProducts::new(file.path())) {
            Err(CatalogError::Invalid(DomainError::Validation(msg)))
                if msg.contains("min_order must be positive") => {}
            other => panic!("Expected min_order validation error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let source = JsonFileProducts::new("/nonexistent/chemsales-catalog.json");
        match source.load() {
            Err(CatalogError::Io { path, .. }) => assert_eq!(path, source.path()),
            other => panic!("Expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn builtin_ids_are_one_through_six() {
        let ids: Vec<u32> = BuiltinProducts
            .load()
            .unwrap()
            .iter()
            .map(|p| p.id.get())
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }
}
