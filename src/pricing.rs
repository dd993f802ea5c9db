//! Pricing
//!
//! Shared minor-unit arithmetic used by flash-sale and voucher evaluation,
//! plus unit-price resolution for a product at a given instant.

use chrono::{DateTime, Utc};
use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::products::Product;

/// Errors that can occur while evaluating prices or discounts.
#[derive(Debug, Error)]
pub enum PricingError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Resolve the effective unit price of a product at `now`.
///
/// Returns the flash-sale price when a sale is attached and currently active
/// for the product's stock level, and the base price otherwise. A missing
/// sale is "no sale", never an error.
///
/// # Errors
///
/// Returns a [`PricingError`] if sale price arithmetic fails.
pub fn unit_price<'a>(
    product: &Product<'a>,
    now: DateTime<Utc>,
) -> Result<Money<'a, Currency>, PricingError> {
    match &product.flash_sale {
        Some(sale) if sale.is_active(product.stock, now) => sale.sale_price(product.price),
        _ => Ok(product.price),
    }
}

/// Calculate a percentage of a minor-unit amount, rounded half away from zero.
///
/// The sign of the percentage is carried through: a negative rate yields a
/// negative result.
///
/// # Errors
///
/// Returns [`PricingError::PercentConversion`] if the calculation overflows
/// or cannot be safely represented in minor units.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, PricingError> {
    scaled_minor(percent, minor, RoundingStrategy::MidpointAwayFromZero)
}

/// Calculate a percentage of a minor-unit amount, rounded toward negative
/// infinity (the behaviour of `Math.floor`, which the original storefront
/// used for sale prices).
///
/// # Errors
///
/// Returns [`PricingError::PercentConversion`] if the calculation overflows
/// or cannot be safely represented in minor units.
pub fn percent_of_minor_floored(percent: &Percentage, minor: i64) -> Result<i64, PricingError> {
    scaled_minor(percent, minor, RoundingStrategy::ToNegativeInfinity)
}

fn scaled_minor(
    percent: &Percentage,
    minor: i64,
    strategy: RoundingStrategy,
) -> Result<i64, PricingError> {
    let minor = Decimal::from_i64(minor).ok_or(PricingError::PercentConversion)?;

    ((*percent) * Decimal::ONE) // decimal_percentage doesn't expose the underlying Decimal
        .checked_mul(minor)
        .ok_or(PricingError::PercentConversion)?
        .round_dp_with_strategy(0, strategy)
        .to_i64()
        .ok_or(PricingError::PercentConversion)
}

/// Clamp a money amount at zero: negative amounts become zero, everything
/// else passes through unchanged.
pub fn floor_at_zero<'a>(amount: Money<'a, Currency>) -> Money<'a, Currency> {
    if amount.is_negative() {
        Money::from_minor(0, amount.currency())
    } else {
        amount
    }
}

/// Return a currency-mismatch error unless the two currencies agree.
///
/// # Errors
///
/// Returns [`PricingError::Money`] wrapping a [`MoneyError::CurrencyMismatch`].
pub fn ensure_same_currency(
    expected: &Currency,
    actual: &Currency,
) -> Result<(), PricingError> {
    if expected == actual {
        Ok(())
    } else {
        Err(PricingError::Money(MoneyError::CurrencyMismatch {
            expected: expected.iso_alpha_code,
            actual: actual.iso_alpha_code,
        }))
    }
}
