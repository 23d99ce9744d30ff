use anyhow::Context;
use clap::Parser;

use chemsales_catalog::Catalog;
use chemsales_storefront::{CliArgs, Storefront, StorefrontConfig, session};

fn main() -> anyhow::Result<()> {
    let config = StorefrontConfig::from_args(CliArgs::parse());
    chemsales_observability::init(config.log_format);

    let source = config.product_source();
    let catalog = Catalog::load(source.as_ref())
        .with_context(|| format!("failed to load catalog from {}", source.describe()))?;

    let mut storefront = Storefront::new(catalog, config.receipt_number_source());
    let mut printer = config.printer()?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    session::run(&mut storefront, stdin.lock(), &mut stdout.lock(), printer.as_mut())
}
