//! Hand-off of a rendered invoice to the host's print facility.

use std::io::Write;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrintError {
    #[error("failed to write invoice: {0}")]
    Io(#[from] std::io::Error),
}

/// The host environment's print facility. Opaque to the renderer.
pub trait Printer {
    fn print(&mut self, document: &str) -> Result<(), PrintError>;
}

/// Prints by writing the document to any `Write` sink (a terminal, a spool
/// file, a pipe to `lpr`).
#[derive(Debug)]
pub struct WriterPrinter<W: Write> {
    out: W,
}

impl<W: Write> WriterPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Printer for WriterPrinter<W> {
    fn print(&mut self, document: &str) -> Result<(), PrintError> {
        self.out.write_all(document.as_bytes())?;
        if !document.ends_with('\n') {
            self.out.write_all(b"\n")?;
        }
        self.out.flush()?;
        tracing::debug!(bytes = document.len(), "invoice printed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_document_with_trailing_newline() {
        let mut printer = WriterPrinter::new(Vec::new());
        printer.print("INVOICE").unwrap();
        assert_eq!(printer.into_inner(), b"INVOICE\n");
    }
}
