//! Plain-text layout of the printable invoice.

use core::fmt;

use crate::receipt::ReceiptView;

const WIDTH: usize = 72;

pub(crate) fn document(view: &ReceiptView) -> String {
    Document(view).to_string()
}

struct Document<'a>(&'a ReceiptView);

impl fmt::Display for Document<'_> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_document(out, self.0)
    }
}

fn write_document(out: &mut fmt::Formatter<'_>, view: &ReceiptView) -> fmt::Result {
    let heavy = "=".repeat(WIDTH);
    let light = "-".repeat(WIDTH);

    writeln!(out, "INVOICE")?;
    writeln!(out, "Receipt #{}", view.receipt_number)?;
    writeln!(out, "{}", view.date())?;
    writeln!(out, "{heavy}")?;

    writeln!(out, "{}", view.seller.name)?;
    for line in &view.seller.address_lines {
        writeln!(out, "{line}")?;
    }
    writeln!(out, "{}", view.seller.email)?;
    writeln!(out, "{heavy}")?;

    writeln!(out, "Bill To:")?;
    writeln!(out, "{}", view.customer.name)?;
    writeln!(out, "{}", view.customer.company)?;
    writeln!(out, "{}", view.customer.email)?;
    if !view.customer.phone.is_empty() {
        writeln!(out, "{}", view.customer.phone)?;
    }
    writeln!(out, "{light}")?;

    writeln!(out, "{:<34}{:>12}{:>12}{:>14}", "Item", "Qty", "Price", "Total")?;
    writeln!(out, "{heavy}")?;
    for line in &view.lines {
        let qty = format!("{} {}", line.quantity, line.quantity_unit);
        writeln!(
            out,
            "{:<34}{:>12}{:>12}{:>14}",
            line.name,
            qty,
            line.unit_price.to_compact_string(),
            line.line_total.to_compact_string()
        )?;
        writeln!(out, "  {}", line.category)?;
        writeln!(out, "{light}")?;
    }

    let tax_label = format!("Tax ({}%):", view.tax_rate_percent());
    writeln!(out, "{:<20}{:>52}", "Subtotal:", view.subtotal.to_compact_string())?;
    writeln!(out, "{:<20}{:>52}", tax_label, view.tax.to_fixed_string())?;
    writeln!(out, "{heavy}")?;
    writeln!(out, "{:<20}{:>52}", "Total:", view.total.to_fixed_string())?;
    writeln!(out)?;

    writeln!(out, "{:^WIDTH$}", "Thank you for your business!")?;
    writeln!(out, "{:^WIDTH$}", "Payment terms: Net 30 days from invoice date")?;
    Ok(())
}
