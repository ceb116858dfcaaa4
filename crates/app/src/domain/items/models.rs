//! Item Models

use std::str::FromStr;

use jiff::Timestamp;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use viyaabhaaram::items::Item as SaleItem;

use crate::{domain::items::errors::ItemsServiceError, uuids::TypedUuid};

/// Category given to items created without one.
pub const DEFAULT_CATEGORY: &str = "General";

/// Item UUID
pub type ItemUuid = TypedUuid<Item>;

/// Item Model
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub uuid: ItemUuid,
    pub name: String,

    /// Unit price in minor currency units.
    pub price: u64,
    pub stock: u32,
    pub category: String,

    /// Encoded image payload, stored as text.
    pub image: Option<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Item {
    /// Snapshot this record as a sellable item priced in `currency`.
    ///
    /// # Errors
    ///
    /// Returns [`ItemsServiceError::OutOfRange`] when the price does not fit
    /// the signed minor unit range.
    pub fn to_sale_item(
        &self,
        currency: &'static Currency,
    ) -> Result<SaleItem<'static>, ItemsServiceError> {
        let price = i64::try_from(self.price)?;

        Ok(SaleItem::new(
            self.uuid.into_uuid(),
            self.name.clone(),
            Money::from_minor(price, currency),
            self.stock,
        ))
    }
}

/// New Item Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub uuid: ItemUuid,
    pub name: String,
    pub price: u64,
    pub stock: u32,

    /// Falls back to [`DEFAULT_CATEGORY`] when absent.
    pub category: Option<String>,
    pub image: Option<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub description: Option<String>,
}

impl NewItem {
    /// New item with only the required fields set.
    #[must_use]
    pub fn new(name: impl Into<String>, price: u64, stock: u32) -> Self {
        Self {
            uuid: ItemUuid::new(),
            name: name.into(),
            price,
            stock,
            category: None,
            image: None,
            sizes: Vec::new(),
            colors: Vec::new(),
            description: None,
        }
    }

    /// Category to persist.
    pub fn category(&self) -> &str {
        self.category
            .as_deref()
            .filter(|category| !category.trim().is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
    }

    /// Check the item can be stored and later sold.
    ///
    /// # Errors
    ///
    /// - [`ItemsServiceError::Validation`]: the name is blank.
    /// - [`ItemsServiceError::OutOfRange`]: price or stock exceed the store's column range.
    pub fn validate(&self) -> Result<(), ItemsServiceError> {
        if self.name.trim().is_empty() {
            return Err(ItemsServiceError::Validation("name is required".to_string()));
        }

        i64::try_from(self.price)?;
        i32::try_from(self.stock)?;

        Ok(())
    }
}

/// Result of an atomic stock decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockDecrement {
    pub item: ItemUuid,

    /// Stock held by the store immediately before the decrement.
    pub previous_stock: u32,

    /// Stock after the decrement, floored at zero.
    pub stock: u32,
}

/// Parse a decimal price such as `12.50` into minor units of `currency`.
///
/// # Errors
///
/// Returns [`ItemsServiceError::Validation`] when the input is not a number, is
/// negative, or has more decimal places than the currency allows.
pub fn parse_price(input: &str, currency: &Currency) -> Result<u64, ItemsServiceError> {
    let mut amount = Decimal::from_str(input.trim())
        .map_err(|error| ItemsServiceError::Validation(format!("price {input:?}: {error}")))?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ItemsServiceError::Validation(format!(
            "price {input:?} is negative"
        )));
    }

    if amount.scale() > currency.exponent {
        return Err(ItemsServiceError::Validation(format!(
            "price {input:?} has more than {} decimal places",
            currency.exponent
        )));
    }

    amount.rescale(currency.exponent);

    Ok(u64::try_from(amount.mantissa())?)
}
