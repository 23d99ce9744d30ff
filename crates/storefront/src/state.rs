use chrono::{DateTime, Utc};
use thiserror::Error;

use chemsales_catalog::Catalog;
use chemsales_core::{Aggregate, DomainError, Event, ProductId, SessionId};
use chemsales_invoicing::{PrintError, Printer, ReceiptNumberSource, ReceiptView};
use chemsales_sales::{
    AddItem, AdjustQuantity, Cart, CartCommand, CheckoutError, CustomerField, CustomerInfo,
    RemoveItem, ensure_ready,
};

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("No product with id {0}.")]
    UnknownProduct(ProductId),

    #[error("Close the invoice first.")]
    InvoiceOpen,

    #[error("No invoice to print.")]
    NoInvoice,

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Print(#[from] PrintError),
}

/// Which overlay is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Product grid only.
    Browsing,
    /// Slide-over cart panel open.
    CartOpen,
    /// Invoice overlay open. The view is dropped when the overlay closes.
    ReceiptShown(Box<ReceiptView>),
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Browsing => "browsing",
            ViewState::CartOpen => "cart_open",
            ViewState::ReceiptShown(_) => "receipt_shown",
        }
    }
}

/// Page state of one storefront session.
///
/// All transitions are synchronous and driven by the caller; the invoice
/// overlay is modal, so cart and customer edits are refused while it shows.
pub struct Storefront {
    session_id: SessionId,
    catalog: Catalog,
    cart: Cart,
    customer: CustomerInfo,
    view: ViewState,
    receipt_numbers: Box<dyn ReceiptNumberSource>,
}

impl Storefront {
    pub fn new(catalog: Catalog, receipt_numbers: Box<dyn ReceiptNumberSource>) -> Self {
        Self {
            session_id: SessionId::new(),
            catalog,
            cart: Cart::new(),
            customer: CustomerInfo::default(),
            view: ViewState::Browsing,
            receipt_numbers,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn customer(&self) -> &CustomerInfo {
        &self.customer
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn receipt(&self) -> Option<&ReceiptView> {
        match &self.view {
            ViewState::ReceiptShown(view) => Some(view.as_ref()),
            _ => None,
        }
    }

    pub fn open_cart(&mut self) -> Result<(), StorefrontError> {
        self.ensure_no_invoice()?;
        self.transition(ViewState::CartOpen);
        Ok(())
    }

    /// Close whichever overlay is showing. The cart itself is untouched.
    pub fn close_overlay(&mut self) {
        self.transition(ViewState::Browsing);
    }

    pub fn add_to_cart(&mut self, product_id: ProductId) -> Result<(), StorefrontError> {
        self.ensure_no_invoice()?;
        let product = self
            .catalog
            .get(product_id)
            .ok_or(StorefrontError::UnknownProduct(product_id))?
            .clone();
        self.dispatch(CartCommand::AddItem(AddItem { product }))
    }

    /// One minimum-order step up.
    pub fn increase(&mut self, product_id: ProductId) -> Result<(), StorefrontError> {
        self.step(product_id, false)
    }

    /// One minimum-order step down, never below the minimum order.
    pub fn decrease(&mut self, product_id: ProductId) -> Result<(), StorefrontError> {
        self.step(product_id, true)
    }

    /// Drop a line. Ids with no cart line, in the catalog or not, are ignored.
    pub fn remove_from_cart(&mut self, product_id: ProductId) -> Result<(), StorefrontError> {
        self.ensure_no_invoice()?;
        self.dispatch(CartCommand::RemoveItem(RemoveItem { product_id }))
    }

    pub fn set_customer_field(
        &mut self,
        field: CustomerField,
        value: impl Into<String>,
    ) -> Result<(), StorefrontError> {
        self.ensure_no_invoice()?;
        self.customer.set(field, value);
        Ok(())
    }

    /// Show the invoice for the current cart as of `issued_at`.
    ///
    /// On a failed precondition the view is left as it was and the error
    /// carries the notification text.
    pub fn generate_receipt(
        &mut self,
        issued_at: DateTime<Utc>,
    ) -> Result<&ReceiptView, StorefrontError> {
        self.ensure_no_invoice()?;

        if let Err(err) = ensure_ready(&self.cart, &self.customer) {
            tracing::info!(reason = %err, "receipt refused");
            return Err(err.into());
        }

        let receipt = ReceiptView::build(
            &self.cart,
            &self.customer,
            issued_at,
            self.receipt_numbers.as_ref(),
        )?;
        tracing::info!(
            receipt_number = %receipt.receipt_number,
            lines = receipt.lines.len(),
            total_cents = receipt.total.cents(),
            "receipt generated"
        );

        self.transition(ViewState::ReceiptShown(Box::new(receipt)));
        match &self.view {
            ViewState::ReceiptShown(view) => Ok(view.as_ref()),
            _ => Err(DomainError::invariant("receipt view missing after generation").into()),
        }
    }

    /// Hand the shown invoice to the host print facility.
    pub fn print_receipt(&self, printer: &mut dyn Printer) -> Result<(), StorefrontError> {
        let receipt = self.receipt().ok_or(StorefrontError::NoInvoice)?;
        printer.print(&receipt.to_document())?;
        tracing::info!(receipt_number = %receipt.receipt_number, "receipt sent to printer");
        Ok(())
    }

    fn step(&mut self, product_id: ProductId, down: bool) -> Result<(), StorefrontError> {
        self.ensure_no_invoice()?;

        let Some(line) = self.cart.line(product_id) else {
            return Ok(());
        };
        let step = line.product.step()?;
        let delta = if down { -step } else { step };
        self.dispatch(CartCommand::AdjustQuantity(AdjustQuantity { product_id, delta }))
    }

    fn dispatch(&mut self, command: CartCommand) -> Result<(), StorefrontError> {
        let events = self.cart.execute(&command)?;
        for event in &events {
            tracing::debug!(
                event_type = event.event_type(),
                cart_version = self.cart.version(),
                "cart updated"
            );
        }
        Ok(())
    }

    fn transition(&mut self, next: ViewState) {
        if self.view.name() != next.name() {
            tracing::debug!(from = self.view.name(), to = next.name(), "view changed");
        }
        self.view = next;
    }

    fn ensure_no_invoice(&self) -> Result<(), StorefrontError> {
        match self.view {
            ViewState::ReceiptShown(_) => Err(StorefrontError::InvoiceOpen),
            _ => Ok(()),
        }
    }
}
