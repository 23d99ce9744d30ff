//! Line-oriented storefront session.

use std::io::{BufRead, Write};

use anyhow::Context;
use chrono::Utc;

use chemsales_invoicing::Printer;

use crate::command::{Action, USAGE};
use crate::render;
use crate::state::Storefront;

/// Drive `storefront` from `input` until `quit` or end of input.
///
/// Every action re-renders the current view to `out`. Refused actions print
/// a single `! <message>` notice and leave state as it was.
pub fn run<R, W>(
    storefront: &mut Storefront,
    input: R,
    out: &mut W,
    printer: &mut dyn Printer,
) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    let span = tracing::info_span!("session", session_id = %storefront.session_id());
    let _entered = span.enter();
    tracing::info!(products = storefront.catalog().len(), "session started");

    write!(out, "{}", render::screen(storefront)).context("failed to write output")?;
    writeln!(out, "Type `help` for commands.").context("failed to write output")?;

    for line in input.lines() {
        let line = line.context("failed to read input")?;

        let action = match Action::parse(&line) {
            Ok(Some(action)) => action,
            Ok(None) => continue,
            Err(err) => {
                writeln!(out, "! {err}").context("failed to write output")?;
                continue;
            }
        };

        if action == Action::Quit {
            break;
        }

        match apply(storefront, &action, printer) {
            Ok(Redraw::Screen) => {
                write!(out, "{}", render::screen(storefront)).context("failed to write output")?;
            }
            Ok(Redraw::Text(text)) => {
                writeln!(out, "{text}").context("failed to write output")?;
            }
            Ok(Redraw::Nothing) => {}
            Err(err) => {
                tracing::debug!(?action, error = %err, "action refused");
                writeln!(out, "! {err}").context("failed to write output")?;
            }
        }
    }

    out.flush().context("failed to flush output")?;
    tracing::info!(cart_lines = storefront.cart().len(), "session ended");
    Ok(())
}

enum Redraw {
    Screen,
    Text(String),
    Nothing,
}

fn apply(
    storefront: &mut Storefront,
    action: &Action,
    printer: &mut dyn Printer,
) -> Result<Redraw, crate::state::StorefrontError> {
    match action {
        Action::Products => Ok(Redraw::Text(render::product_grid(storefront.catalog()))),
        Action::Add(id) => {
            storefront.add_to_cart(*id)?;
            Ok(Redraw::Screen)
        }
        Action::Increase(id) => {
            storefront.increase(*id)?;
            Ok(Redraw::Screen)
        }
        Action::Decrease(id) => {
            storefront.decrease(*id)?;
            Ok(Redraw::Screen)
        }
        Action::Remove(id) => {
            storefront.remove_from_cart(*id)?;
            Ok(Redraw::Screen)
        }
        Action::OpenCart => {
            storefront.open_cart()?;
            Ok(Redraw::Screen)
        }
        Action::Close => {
            storefront.close_overlay();
            Ok(Redraw::Screen)
        }
        Action::SetField(field, value) => {
            storefront.set_customer_field(*field, value.clone())?;
            Ok(Redraw::Nothing)
        }
        Action::Checkout => {
            storefront.generate_receipt(Utc::now())?;
            Ok(Redraw::Screen)
        }
        Action::Print => {
            storefront.print_receipt(printer)?;
            Ok(Redraw::Text("Invoice sent to printer.".to_string()))
        }
        Action::Help => Ok(Redraw::Text(USAGE.to_string())),
        Action::Quit => Ok(Redraw::Nothing),
    }
}
