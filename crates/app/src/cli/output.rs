//! Table and money formatting for command output.

use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use viyaabhaaram_app::domain::{items::models::Item, transactions::models::Transaction};

/// Format minor units as money, falling back to the raw amount when it does
/// not fit a signed minor unit value.
pub(crate) fn money(amount: u64, currency: &'static Currency) -> String {
    i64::try_from(amount).map_or_else(
        |_| format!("{amount} {}", currency.iso_alpha_code),
        |minor| Money::from_minor(minor, currency).to_string(),
    )
}

pub(crate) fn items_table<'a>(
    items: impl IntoIterator<Item = &'a Item>,
    currency: &'static Currency,
) -> String {
    let mut builder = Builder::default();

    builder.push_record(["UUID", "Name", "Category", "Price", "Stock"]);

    for item in items {
        builder.push_record([
            item.uuid.to_string(),
            item.name.clone(),
            item.category.clone(),
            money(item.price, currency),
            item.stock.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..5), Alignment::right());

    table.to_string()
}

pub(crate) fn transactions_table<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    currency: &'static Currency,
) -> String {
    let mut builder = Builder::default();

    builder.push_record(["UUID", "Date", "Kind", "Lines", "Amount"]);

    for transaction in transactions {
        builder.push_record([
            transaction.uuid.to_string(),
            transaction.date.to_string(),
            transaction.kind.to_string(),
            transaction.items_data.len().to_string(),
            money(transaction.amount, currency),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..5), Alignment::right());

    table.to_string()
}
