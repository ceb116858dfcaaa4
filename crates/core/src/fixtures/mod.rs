//! Fixtures

use rusty_money::{Money, iso::INR};
use uuid::Uuid;

use crate::items::Item;

/// Build an INR-priced item with a fresh identifier.
pub(crate) fn item(name: &str, price_minor: i64, stock: u32) -> Item<'static> {
    Item::new(Uuid::now_v7(), name, Money::from_minor(price_minor, INR), stock)
}
