//! Pricing

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

/// Errors that can occur while pricing cart lines.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// A line extension or total does not fit in the minor unit range.
    #[error("amount overflows the supported range")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Calculates `price * qty` exactly in minor units.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] when the extension does not fit.
pub fn line_total<'a>(
    price: &Money<'a, Currency>,
    qty: u32,
) -> Result<Money<'a, Currency>, PricingError> {
    let minor = price
        .to_minor_units()
        .checked_mul(i64::from(qty))
        .ok_or(PricingError::Overflow)?;

    Ok(Money::from_minor(minor, price.currency()))
}

/// Sums a list of amounts, starting from zero in the given currency.
///
/// # Errors
///
/// - [`PricingError::Money`]: an amount is in a different currency.
/// - [`PricingError::Overflow`]: the sum does not fit in minor units.
pub fn sum<'a>(
    currency: &'a Currency,
    amounts: impl IntoIterator<Item = Money<'a, Currency>>,
) -> Result<Money<'a, Currency>, PricingError> {
    amounts
        .into_iter()
        .try_fold(Money::from_minor(0, currency), |acc, amount| {
            if amount.currency() != currency {
                return Err(PricingError::Money(MoneyError::CurrencyMismatch {
                    expected: currency.iso_alpha_code,
                    actual: amount.currency().iso_alpha_code,
                }));
            }

            let minor = acc
                .to_minor_units()
                .checked_add(amount.to_minor_units())
                .ok_or(PricingError::Overflow)?;

            Ok(Money::from_minor(minor, currency))
        })
}
