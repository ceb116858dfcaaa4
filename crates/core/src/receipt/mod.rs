//! Receipt

use std::io;

use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::{Cart, CartError, LineSnapshot},
    pricing::{PricingError, sum},
};

/// Errors that can occur when building or writing a bill.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Error pricing the cart.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Error summing snapshot lines.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// IO error
    #[error("IO error")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone)]
struct BillRow<'a> {
    name: String,
    qty: u32,
    unit_price: Money<'a, Currency>,
    amount: Money<'a, Currency>,
}

/// A printable bill for a sale.
#[derive(Debug, Clone)]
pub struct Bill<'a> {
    rows: Vec<BillRow<'a>>,
    total: Money<'a, Currency>,
}

impl<'a> Bill<'a> {
    /// Build a bill from the current cart contents.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError::Cart`] if a line or the total cannot be priced.
    pub fn from_cart(cart: &Cart<'a>) -> Result<Self, ReceiptError> {
        let rows = cart
            .iter()
            .map(|line| -> Result<BillRow<'a>, CartError> {
                Ok(BillRow {
                    name: line.item().name().to_string(),
                    qty: line.qty(),
                    unit_price: *line.item().price(),
                    amount: line.extension()?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            rows,
            total: cart.total()?,
        })
    }

    /// Build a bill from the lines frozen into a stored transaction.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError::Pricing`] if the lines cannot be summed.
    pub fn from_snapshot(lines: &[LineSnapshot], currency: &'a Currency) -> Result<Self, ReceiptError> {
        let rows: Vec<BillRow<'a>> = lines
            .iter()
            .map(|line| BillRow {
                name: line.name.clone(),
                qty: line.qty,
                unit_price: Money::from_minor(line.unit_price, currency),
                amount: Money::from_minor(line.extension, currency),
            })
            .collect();

        let total = sum(currency, rows.iter().map(|row| row.amount))?;

        Ok(Self { rows, total })
    }

    /// Returns the bill total.
    pub fn total(&self) -> &Money<'a, Currency> {
        &self.total
    }

    /// Returns the number of lines on the bill.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when the bill has no lines.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Writes the bill as a table followed by the total.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Qty", "Unit Price", "Amount"]);

        for row in &self.rows {
            builder.push_record([
                row.name.clone(),
                row.qty.to_string(),
                row.unit_price.to_string(),
                row.amount.to_string(),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(1..4), Alignment::right());
        table.modify(Rows::first(), Alignment::center());

        writeln!(out, "\n{table}")?;
        writeln!(out, "Total: {}", self.total)?;

        Ok(())
    }
}
