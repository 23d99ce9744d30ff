//! Invoice renderer.
//!
//! Derives the receipt view shown after checkout from the cart, the customer
//! details and the issue time. Nothing here is stored: every call recomputes
//! the view from current state.

pub mod numbering;
pub mod print;
pub mod receipt;
mod render;

pub use numbering::{
    ReceiptNumber, ReceiptNumberSource, SequentialReceiptNumbers, TimestampReceiptNumbers,
};
pub use print::{PrintError, Printer, WriterPrinter};
pub use receipt::{ReceiptLine, ReceiptView, SellerInfo, TAX_RATE_BASIS_POINTS};
