//! Items

use rusty_money::{Money, iso::Currency};
use uuid::Uuid;

/// A catalog item as billing sees it: identity, name, price and the stock
/// known when the item was read from the catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct Item<'a> {
    id: Uuid,
    name: String,
    price: Money<'a, Currency>,
    stock: u32,
}

impl<'a> Item<'a> {
    /// Creates a new item.
    pub fn new(id: Uuid, name: impl Into<String>, price: Money<'a, Currency>, stock: u32) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            stock,
        }
    }

    /// Returns the item identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the item name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unit price of the item.
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }

    /// Returns the stock known for the item.
    pub fn stock(&self) -> u32 {
        self.stock
    }

    /// Returns true when no units are left.
    pub fn is_out_of_stock(&self) -> bool {
        self.stock == 0
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::INR;

    use super::*;

    #[test]
    fn zero_stock_is_out_of_stock() {
        let item = Item::new(Uuid::now_v7(), "Salt", Money::from_minor(20_00, INR), 0);

        assert!(item.is_out_of_stock());
    }
}
