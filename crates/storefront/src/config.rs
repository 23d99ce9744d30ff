//! Command-line and environment configuration.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use chemsales_catalog::{BuiltinProducts, JsonFileProducts, ProductSource};
use chemsales_invoicing::{
    Printer, ReceiptNumberSource, SequentialReceiptNumbers, TimestampReceiptNumbers, WriterPrinter,
};
use chemsales_observability::LogFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

/// How receipt numbers are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReceiptNumbering {
    /// Last eight digits of the epoch-millisecond issue time.
    Timestamp,
    /// Monotonic counter starting at 1.
    Sequential,
}

#[derive(Debug, Parser)]
#[command(
    name = "chemsales-storefront",
    version,
    about = "Paint chemical sales counter: cart and printable invoice"
)]
pub struct CliArgs {
    /// JSON catalog file; the built-in price list is used when absent.
    #[arg(long, env = "CHEMSALES_CATALOG", value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    #[arg(
        long,
        env = "CHEMSALES_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormatArg::Pretty
    )]
    pub log_format: LogFormatArg,

    #[arg(
        long,
        env = "CHEMSALES_RECEIPT_NUMBERS",
        value_enum,
        default_value_t = ReceiptNumbering::Timestamp
    )]
    pub receipt_numbers: ReceiptNumbering,

    /// Append printed invoices to this file instead of stdout.
    #[arg(long, env = "CHEMSALES_PRINT_TO", value_name = "PATH")]
    pub print_to: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    pub catalog: Option<PathBuf>,
    pub log_format: LogFormat,
    pub receipt_numbers: ReceiptNumbering,
    pub print_to: Option<PathBuf>,
}

impl StorefrontConfig {
    pub fn from_args(args: CliArgs) -> Self {
        let CliArgs {
            catalog,
            log_format,
            receipt_numbers,
            print_to,
        } = args;

        Self {
            catalog,
            log_format: log_format.into(),
            receipt_numbers,
            print_to,
        }
    }

    pub fn product_source(&self) -> Box<dyn ProductSource> {
        match &self.catalog {
            Some(path) => Box::new(JsonFileProducts::new(path.clone())),
            None => Box::new(BuiltinProducts),
        }
    }

    pub fn receipt_number_source(&self) -> Box<dyn ReceiptNumberSource> {
        match self.receipt_numbers {
            ReceiptNumbering::Timestamp => Box::new(TimestampReceiptNumbers),
            ReceiptNumbering::Sequential => Box::new(SequentialReceiptNumbers::default()),
        }
    }

    /// The print facility: an append-only spool file or stdout.
    pub fn printer(&self) -> Result<Box<dyn Printer>> {
        let sink: Box<dyn Write> = match &self.print_to {
            Some(path) => Box::new(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("failed to open print spool {}", path.display()))?,
            ),
            None => Box::new(std::io::stdout()),
        };
        Ok(Box::new(WriterPrinter::new(sink)))
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;

    use super::*;

    #[test]
    fn defaults_use_builtin_catalog_and_timestamp_numbers() {
        let args = CliArgs::try_parse_from(["chemsales-storefront"]).unwrap();
        let config = StorefrontConfig::from_args(args);
        assert!(config.catalog.is_none());
        assert_eq!(config.receipt_numbers, ReceiptNumbering::Timestamp);
        assert_eq!(config.product_source().describe(), "builtin");
    }

    #[test]
    fn flags_override_defaults() {
        let args = CliArgs::try_parse_from([
            "chemsales-storefront",
            "--catalog",
            "/etc/chemsales/catalog.json",
            "--log-format",
            "json",
            "--receipt-numbers",
            "sequential",
        ])
        .unwrap();
        let config = StorefrontConfig::from_args(args);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.receipt_numbers, ReceiptNumbering::Sequential);
        assert_eq!(config.product_source().describe(), "/etc/chemsales/catalog.json");
    }

    #[test]
    fn rejects_unknown_numbering() {
        let args = ["chemsales-storefront", "--receipt-numbers", "random"];
        assert!(CliArgs::try_parse_from(args).is_err());
    }

    #[test]
    fn print_to_appends_each_invoice_to_the_spool_file() {
        let dir = tempfile::tempdir().unwrap();
        let spool = dir.path().join("invoices.txt");
        let args = CliArgs::try_parse_from([
            OsStr::new("chemsales-storefront"),
            OsStr::new("--print-to"),
            spool.as_os_str(),
        ])
        .unwrap();
        let config = StorefrontConfig::from_args(args);

        config.printer().unwrap().print("INVOICE\nReceipt #RCP-00000001").unwrap();
        config.printer().unwrap().print("INVOICE\nReceipt #RCP-00000002").unwrap();

        let printed = std::fs::read_to_string(&spool).unwrap();
        assert_eq!(
            printed,
            "INVOICE\nReceipt #RCP-00000001\nINVOICE\nReceipt #RCP-00000002\n"
        );
    }

    #[test]
    fn unopenable_spool_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut config =
            StorefrontConfig::from_args(CliArgs::try_parse_from(["chemsales-storefront"]).unwrap());
        config.print_to = Some(dir.path().join("missing").join("invoices.txt"));

        let err = config.printer().err().unwrap();
        assert!(err.to_string().contains("failed to open print spool"));
    }
}
