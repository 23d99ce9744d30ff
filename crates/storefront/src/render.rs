//! Text rendering of the product grid, cart panel and invoice overlay.

use core::fmt;

use chemsales_catalog::{Catalog, Product};
use chemsales_sales::{Cart, CustomerField, CustomerInfo};

use crate::state::{Storefront, ViewState};

const RULE_WIDTH: usize = 72;

/// Render whatever the current view shows, under the page header.
pub fn screen(storefront: &Storefront) -> String {
    match storefront.view() {
        ViewState::Browsing => format!(
            "{}{}",
            header(storefront.cart()),
            product_grid(storefront.catalog())
        ),
        ViewState::CartOpen => cart_panel(storefront.cart(), storefront.customer()),
        ViewState::ReceiptShown(receipt) => receipt.to_document(),
    }
}

pub fn header(cart: &Cart) -> String {
    let title = "Paint Chemical Products";
    let badge = format!("Cart ({})", cart.len());
    let pad = RULE_WIDTH.saturating_sub(title.len() + badge.len());
    format!("{title}{}{badge}\n{}\n", " ".repeat(pad), "=".repeat(RULE_WIDTH))
}

pub fn product_grid(catalog: &Catalog) -> String {
    ProductGrid(catalog).to_string()
}

pub fn cart_panel(cart: &Cart, customer: &CustomerInfo) -> String {
    CartPanel { cart, customer }.to_string()
}

struct ProductGrid<'a>(&'a Catalog);

impl fmt::Display for ProductGrid<'_> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        for product in self.0.products() {
            write_product_card(out, product)?;
        }
        Ok(())
    }
}

struct CartPanel<'a> {
    cart: &'a Cart,
    customer: &'a CustomerInfo,
}

impl fmt::Display for CartPanel<'_> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_cart_panel(out, self.cart, self.customer)
    }
}

fn write_product_card(out: &mut fmt::Formatter<'_>, product: &Product) -> fmt::Result {
    writeln!(
        out,
        "[{}] {} {}  ({})",
        product.id,
        product.glyph,
        product.name,
        product.category.to_uppercase()
    )?;
    if !product.description.is_empty() {
        writeln!(out, "    {}", product.description)?;
    }
    writeln!(
        out,
        "    {} {} | Min order: {} {}",
        product.unit_price.to_compact_string(),
        product.unit,
        product.min_order,
        product.quantity_unit
    )?;
    writeln!(out)
}

fn write_cart_panel(
    out: &mut fmt::Formatter<'_>,
    cart: &Cart,
    customer: &CustomerInfo,
) -> fmt::Result {
    writeln!(out, "Shopping Cart")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;

    if cart.is_empty() {
        writeln!(out, "Your cart is empty")?;
        return Ok(());
    }

    for line in cart.lines() {
        let product = &line.product;
        writeln!(out, "[{}] {}", product.id, product.name)?;
        writeln!(
            out,
            "    {} {}",
            product.unit_price.to_compact_string(),
            product.unit
        )?;
        let total = line
            .line_total()
            .map(|m| m.to_compact_string())
            .unwrap_or_else(|_| "overflow".to_string());
        let qty = format!("[-] {} {} [+]", line.quantity, product.quantity_unit);
        writeln!(out, "    {qty:<40}{total:>28}")?;
    }
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

    for field in [
        CustomerField::Name,
        CustomerField::Company,
        CustomerField::Email,
        CustomerField::Phone,
    ] {
        let marker = if field.is_required() { " *" } else { "" };
        let label = format!("{}{marker}:", capitalize(field.as_str()));
        writeln!(out, "{label:<12}{}", customer.get(field))?;
    }
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

    let total = cart
        .total_price()
        .map(|m| m.to_compact_string())
        .unwrap_or_else(|_| "overflow".to_string());
    writeln!(out, "{:<20}{:>52}", "Total:", total)?;
    writeln!(out, "Type `checkout` to generate the invoice.")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
