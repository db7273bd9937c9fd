//! Pricing

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

/// Errors that can occur while pricing cart lines or discounts.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// An intermediate amount did not fit in minor units.
    #[error("amount overflowed while pricing")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// A zero amount in the given currency.
pub fn zero(currency: &Currency) -> Money<'_, Currency> {
    Money::from_minor(0, currency)
}

/// Price of `quantity` units at `price` each.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: the total does not fit in minor units.
pub fn line_total<'a>(
    price: &Money<'a, Currency>,
    quantity: u32,
) -> Result<Money<'a, Currency>, PricingError> {
    let minor = price
        .to_minor_units()
        .checked_mul(i64::from(quantity))
        .ok_or(PricingError::Overflow)?;

    Ok(Money::from_minor(minor, price.currency()))
}

/// `percent` percent (e.g. `12.5` for 12.5 %) of an amount in minor units, rounded half away
/// from zero.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: the intermediate product cannot be represented.
pub fn percent_of_minor(percent: Decimal, minor: i64) -> Result<i64, PricingError> {
    let Some(minor) = Decimal::from_i64(minor) else {
        return Err(PricingError::Overflow);
    };

    let applied = percent
        .checked_mul(minor)
        .and_then(|value| value.checked_div(Decimal::ONE_HUNDRED))
        .ok_or(PricingError::Overflow)?;

    applied
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PricingError::Overflow)
}

/// Converts a major-unit decimal amount (e.g. `4.50`) into minor units for `currency`.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: the amount cannot be represented in minor units.
pub fn decimal_to_minor(amount: Decimal, currency: &Currency) -> Result<i64, PricingError> {
    let scale = Decimal::from_i64(10_i64.pow(currency.exponent)).ok_or(PricingError::Overflow)?;

    amount
        .checked_mul(scale)
        .ok_or(PricingError::Overflow)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PricingError::Overflow)
}
