//! Cart

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    items::Item,
    pricing::{PricingError, line_total, sum},
    reconciliation::StockAdjustment,
};

/// Errors related to cart mutation or totals.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// Adding another unit would exceed the stock known for the item.
    #[error("stock limit reached for item {item}: {stock} in stock")]
    StockExceeded {
        /// Item that could not be added.
        item: Uuid,
        /// Stock known for the item when the add was attempted.
        stock: u32,
    },

    /// The item is priced in a different currency from the cart.
    #[error("item {item} has currency {item_currency}, but cart has currency {cart_currency}")]
    CurrencyMismatch {
        /// Item that could not be added.
        item: Uuid,
        /// ISO code of the item's currency.
        item_currency: &'static str,
        /// ISO code of the cart's currency.
        cart_currency: &'static str,
    },

    /// No line exists for the item.
    #[error("item {0} not found in cart")]
    LineNotFound(Uuid),

    /// Line extension or total could not be computed.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// A single cart line: an item snapshot and the quantity being sold.
#[derive(Clone, Debug, PartialEq)]
pub struct CartLine<'a> {
    item: Item<'a>,
    qty: u32,
}

impl<'a> CartLine<'a> {
    /// Returns the item snapshot for this line.
    pub fn item(&self) -> &Item<'a> {
        &self.item
    }

    /// Returns the quantity on this line.
    pub fn qty(&self) -> u32 {
        self.qty
    }

    /// Returns `price * qty` for this line.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the extension overflows.
    pub fn extension(&self) -> Result<Money<'a, Currency>, PricingError> {
        line_total(self.item.price(), self.qty)
    }
}

/// Frozen copy of a cart line, stored with the transaction that sold it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSnapshot {
    /// Identifier of the sold item.
    pub item_id: Uuid,

    /// Item name at the time of sale.
    pub name: String,

    /// Unit price in minor units.
    pub unit_price: i64,

    /// Quantity sold.
    pub qty: u32,

    /// `unit_price * qty` in minor units.
    pub extension: i64,
}

/// Lines the operator is about to sell.
#[derive(Debug, Clone)]
pub struct Cart<'a> {
    lines: Vec<CartLine<'a>>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create an empty cart in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: Vec::new(),
            currency,
        }
    }

    /// Add one unit of `item`, returning the resulting line quantity.
    ///
    /// A new line starts at one unit. An existing line is incremented only
    /// while its quantity is below the item's stock. The line keeps the most
    /// recent snapshot of the item it was given.
    ///
    /// # Errors
    ///
    /// - [`CartError::StockExceeded`]: no further unit is available; the cart is unchanged.
    /// - [`CartError::CurrencyMismatch`]: the item is priced in another currency.
    pub fn add_line(&mut self, item: &Item<'a>) -> Result<u32, CartError> {
        let item_currency = item.price().currency();

        if item_currency != self.currency {
            return Err(CartError::CurrencyMismatch {
                item: item.id(),
                item_currency: item_currency.iso_alpha_code,
                cart_currency: self.currency.iso_alpha_code,
            });
        }

        let stock_exceeded = CartError::StockExceeded {
            item: item.id(),
            stock: item.stock(),
        };

        match self.lines.iter_mut().find(|line| line.item.id() == item.id()) {
            Some(line) if line.qty < item.stock() => {
                line.qty += 1;
                line.item = item.clone();

                Ok(line.qty)
            }
            Some(_) => Err(stock_exceeded),
            None if item.is_out_of_stock() => Err(stock_exceeded),
            None => {
                self.lines.push(CartLine {
                    item: item.clone(),
                    qty: 1,
                });

                Ok(1)
            }
        }
    }

    /// Remove the line for the given item.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if no line exists for the item.
    pub fn remove_line(&mut self, item: Uuid) -> Result<CartLine<'a>, CartError> {
        let index = self
            .lines
            .iter()
            .position(|line| line.item.id() == item)
            .ok_or(CartError::LineNotFound(item))?;

        Ok(self.lines.remove(index))
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Calculate `Σ price * qty` over all lines. An empty cart totals zero.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::Pricing`] if a line extension or the sum overflows.
    pub fn total(&self) -> Result<Money<'a, Currency>, CartError> {
        let extensions = self
            .lines
            .iter()
            .map(CartLine::extension)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(sum(self.currency, extensions)?)
    }

    /// Deep copy of the lines for persisting with a transaction.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::Pricing`] if a line extension overflows.
    pub fn snapshot(&self) -> Result<Vec<LineSnapshot>, CartError> {
        self.lines
            .iter()
            .map(|line| -> Result<LineSnapshot, CartError> {
                Ok(LineSnapshot {
                    item_id: line.item.id(),
                    name: line.item.name().to_string(),
                    unit_price: line.item.price().to_minor_units(),
                    qty: line.qty,
                    extension: line.extension()?.to_minor_units(),
                })
            })
            .collect()
    }

    /// Stock changes selling this cart requires, one per line.
    pub fn stock_adjustments(&self) -> Vec<StockAdjustment> {
        self.lines
            .iter()
            .map(|line| StockAdjustment {
                item: line.item.id(),
                name: line.item.name().to_string(),
                qty: line.qty,
                expected_stock: line.item.stock().saturating_sub(line.qty),
            })
            .collect()
    }

    /// Get the line for an item, if any.
    pub fn line(&self, item: Uuid) -> Option<&CartLine<'a>> {
        self.lines.iter().find(|line| line.item.id() == item)
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine<'a>> {
        self.lines.iter()
    }

    /// Get the number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
