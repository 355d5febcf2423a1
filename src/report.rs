//! Report
//!
//! Renders a cart the way the cart screen lays it out: one row per line with
//! its selection mark, followed by the totals and the checkout state.

use std::io;

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    cart::{Cart, CartPhase, CheckoutGate},
    lines::CartLine,
    pricing::to_money,
};

/// Errors that can occur when writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing to the output failed.
    #[error("failed to write report")]
    IO(#[from] io::Error),
}

/// A printable view of a cart.
#[derive(Debug)]
pub struct CartReport<'a> {
    cart: &'a Cart,
    currency: &'static Currency,
}

impl<'a> CartReport<'a> {
    /// Creates a report that shows amounts in `currency`.
    pub fn new(cart: &'a Cart, currency: &'static Currency) -> Self {
        Self { cart, currency }
    }

    /// Writes the line table and the totals.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::IO`] if the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReportError> {
        if self.cart.is_empty() {
            writeln!(out, "Your cart is empty.")?;

            return Ok(());
        }

        writeln!(out, "\n{}", self.table())?;

        self.write_totals(&mut out)
    }

    fn table(&self) -> String {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Condition", "Price", "Selected"]);

        for (idx, line) in self.cart.lines().iter().enumerate() {
            let mark = if self.cart.is_selected(&line.id) {
                "[x]"
            } else {
                "[ ]"
            };

            builder.push_record([
                (idx + 1).to_string(),
                display_name(line).to_string(),
                line.condition.clone(),
                line.price.clone(),
                mark.to_string(),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(3..4), Alignment::right());

        table.to_string()
    }

    fn write_totals(&self, out: &mut impl io::Write) -> Result<(), ReportError> {
        let summary = self.cart.summary();

        writeln!(
            out,
            "Selected: {} of {}",
            summary.selected_count, summary.line_count
        )?;
        writeln!(out, "Subtotal: {}", self.money(summary.subtotal))?;
        writeln!(out, "Shipping: Free")?;
        writeln!(out, "Total:    {}", self.money(summary.total))?;

        let phase = match self.cart.phase() {
            CartPhase::Empty => "empty",
            CartPhase::PartialSelection => "partial selection",
            CartPhase::AllSelected => "all selected",
        };

        writeln!(out, "Cart:     {phase}")?;

        match self.cart.checkout_gate() {
            CheckoutGate::Eligible { .. } => writeln!(out, "Checkout: ready")?,
            CheckoutGate::Blocked(reason) => writeln!(out, "Checkout: blocked ({reason})")?,
        }

        Ok(())
    }

    fn money(&self, amount: Decimal) -> String {
        to_money(amount, self.currency).to_string()
    }
}

fn display_name(line: &CartLine) -> &str {
    if line.name.trim().is_empty() {
        line.id.as_str()
    } else {
        &line.name
    }
}
