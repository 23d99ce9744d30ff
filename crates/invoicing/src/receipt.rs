use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use chemsales_core::{DomainError, DomainResult, Money, ProductId, Quantity};
use chemsales_sales::{Cart, CartLine, CustomerInfo};

use crate::numbering::{ReceiptNumber, ReceiptNumberSource};

/// Flat sales tax rate: 7.5 %.
pub const TAX_RATE_BASIS_POINTS: u32 = 750;

/// The seller block printed at the top of every invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerInfo {
    pub name: String,
    pub address_lines: Vec<String>,
    pub email: String,
}

impl Default for SellerInfo {
    fn default() -> Self {
        Self {
            name: "Paint Chemical Trading Co.".to_string(),
            address_lines: vec![
                "123 Industrial Avenue".to_string(),
                "Chemical District, Lagos".to_string(),
            ],
            email: "info@paintchemical.com".to_string(),
        }
    }
}

/// One invoice row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub product_id: ProductId,
    pub name: String,
    pub category: String,
    pub quantity: Quantity,
    pub quantity_unit: String,
    pub unit_price: Money,
    pub line_total: Money,
}

impl ReceiptLine {
    fn from_cart_line(line: &CartLine) -> DomainResult<Self> {
        Ok(Self {
            product_id: line.product_id(),
            name: line.product.name.clone(),
            category: line.product.category.clone(),
            quantity: line.quantity,
            quantity_unit: line.product.quantity_unit.clone(),
            unit_price: line.product.unit_price,
            line_total: line.line_total()?,
        })
    }
}

/// Invoice view derived from the cart at one instant. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptView {
    pub receipt_number: ReceiptNumber,
    pub issued_at: DateTime<Utc>,
    pub seller: SellerInfo,
    pub customer: CustomerInfo,
    pub lines: Vec<ReceiptLine>,
    pub subtotal: Money,
    pub tax_rate_basis_points: u32,
    pub tax: Money,
    pub total: Money,
}

impl ReceiptView {
    /// Compute the invoice for `cart` as of `issued_at`.
    ///
    /// Checkout preconditions are not re-checked here; see
    /// `chemsales_sales::ensure_ready`.
    pub fn build(
        cart: &Cart,
        customer: &CustomerInfo,
        issued_at: DateTime<Utc>,
        numbers: &dyn ReceiptNumberSource,
    ) -> DomainResult<Self> {
        let lines = cart
            .lines()
            .iter()
            .map(ReceiptLine::from_cart_line)
            .collect::<DomainResult<Vec<_>>>()?;

        let subtotal = cart.total_price()?;
        let tax = subtotal
            .checked_apply_rate(TAX_RATE_BASIS_POINTS)
            .ok_or_else(|| DomainError::invariant("tax amount overflow"))?;
        let total = subtotal
            .checked_add(tax)
            .ok_or_else(|| DomainError::invariant("invoice total overflow"))?;

        Ok(Self {
            receipt_number: numbers.next_number(issued_at),
            issued_at,
            seller: SellerInfo::default(),
            customer: customer.clone(),
            lines,
            subtotal,
            tax_rate_basis_points: TAX_RATE_BASIS_POINTS,
            tax,
            total,
        })
    }

    /// Long-form issue date on the host's calendar, e.g. `October 19, 2026`.
    pub fn date(&self) -> String {
        self.date_in(&Local)
    }

    /// Long-form issue date as seen in `zone`.
    pub fn date_in<Tz>(&self, zone: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: core::fmt::Display,
    {
        self.issued_at.with_timezone(zone).format("%B %-d, %Y").to_string()
    }

    /// Tax rate as a percentage string, e.g. `7.5`.
    pub fn tax_rate_percent(&self) -> String {
        let whole = self.tax_rate_basis_points / 100;
        let frac = self.tax_rate_basis_points % 100;
        if frac == 0 {
            whole.to_string()
        } else {
            let digits = format!("{frac:02}");
            format!("{whole}.{}", digits.trim_end_matches('0'))
        }
    }

    /// The printable invoice document.
    pub fn to_document(&self) -> String {
        crate::render::document(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numbering::{SequentialReceiptNumbers, TimestampReceiptNumbers};
    use chemsales_catalog::{BuiltinProducts, Catalog};
    use chrono::FixedOffset;

    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap()
    }

    fn customer() -> CustomerInfo {
        CustomerInfo {
            name: "Ada Obi".to_string(),
            company: "Obi Coatings Ltd".to_string(),
            email: "ada@obicoatings.example".to_string(),
            phone: "+234 800 000 0000".to_string(),
        }
    }

    fn build(cart: &Cart) -> ReceiptView {
        ReceiptView::build(cart, &customer(), issued_at(), &TimestampReceiptNumbers).unwrap()
    }

    fn cart_of(ids: &[u32]) -> Cart {
        let catalog = Catalog::load(&BuiltinProducts).unwrap();
        let mut cart = Cart::new();
        for id in ids {
            cart.add_to_cart(catalog.get(ProductId::new(*id)).unwrap())
                .unwrap();
        }
        cart
    }

    #[test]
    fn totals_for_calcium_carbonate() {
        let cart = cart_of(&[4]);
        let view = ReceiptView::build(&cart, &customer(), issued_at(), &TimestampReceiptNumbers)
            .unwrap();

        assert_eq!(view.subtotal, Money::from_major(900));
        assert_eq!(view.tax, Money::from_cents(6_750));
        assert_eq!(view.total, Money::from_cents(96_750));
    }

    #[test]
    fn tax_on_one_thousand_is_seventy_five() {
        let mut product = Catalog::load(&BuiltinProducts)
            .unwrap()
            .get(ProductId::new(1))
            .unwrap()
            .clone();
        product.unit_price = Money::from_major(1000);
        let mut cart = Cart::new();
        cart.add_to_cart(&product).unwrap();

        let view = ReceiptView::build(&cart, &customer(), issued_at(), &TimestampReceiptNumbers)
            .unwrap();
        assert_eq!(view.tax.to_fixed_string(), "$75.00");
        assert_eq!(view.total.to_fixed_string(), "$1,075.00");
    }

    #[test]
    fn lines_follow_cart_order() {
        let cart = cart_of(&[3, 1, 3]);
        let view = ReceiptView::build(&cart, &customer(), issued_at(), &TimestampReceiptNumbers)
            .unwrap();

        let ids: Vec<u32> = view.lines.iter().map(|l| l.product_id.get()).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(view.lines[0].quantity, Quantity::from_thousandths(500));
        assert_eq!(view.lines[0].line_total, Money::from_major(725));
    }

    #[test]
    fn date_is_long_form() {
        let view = build(&cart_of(&[1]));
        assert_eq!(view.date_in(&Utc), "October 19, 2026");
    }

    #[test]
    fn date_follows_the_local_calendar_across_midnight() {
        let lagos = FixedOffset::east_opt(3600).unwrap();
        let late_evening_utc = Utc.with_ymd_and_hms(2026, 10, 18, 23, 30, 0).unwrap();
        let view = ReceiptView::build(
            &cart_of(&[1]),
            &customer(),
            late_evening_utc,
            &TimestampReceiptNumbers,
        )
        .unwrap();

        assert_eq!(view.date_in(&Utc), "October 18, 2026");
        assert_eq!(view.date_in(&lagos), "October 19, 2026");
        assert_eq!(view.date(), view.date_in(&Local));
    }

    #[test]
    fn receipt_number_comes_from_source() {
        let numbers = SequentialReceiptNumbers::starting_at(42);
        let view = ReceiptView::build(&cart_of(&[1]), &customer(), issued_at(), &numbers).unwrap();
        assert_eq!(view.receipt_number.to_string(), "RCP-00000042");
    }

    #[test]
    fn tax_rate_renders_as_percent() {
        let view = build(&cart_of(&[1]));
        assert_eq!(view.tax_rate_percent(), "7.5");
    }

    #[test]
    fn building_leaves_cart_untouched() {
        let cart = cart_of(&[2, 5]);
        let before = cart.clone();
        let _ = ReceiptView::build(&cart, &customer(), issued_at(), &TimestampReceiptNumbers)
            .unwrap();
        assert_eq!(cart, before);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: total = subtotal + tax, and tax is within half a cent
            /// of 7.5 % of the subtotal.
            #[test]
            fn total_is_subtotal_plus_rounded_tax(
                adds in proptest::collection::vec(1u32..=6, 1..40),
            ) {
                let view = build(&cart_of(&adds));

                prop_assert_eq!(view.total.cents(), view.subtotal.cents() + view.tax.cents());
                let exact_times_10000 = i128::from(view.subtotal.cents()) * 750;
                let diff = (i128::from(view.tax.cents()) * 10_000 - exact_times_10000).abs();
                prop_assert!(diff <= 5_000);
            }
        }
    }
}
