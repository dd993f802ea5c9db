//! Product Fixtures

use chrono::{DateTime, Utc};
use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD, VND},
};
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    flash_sales::{FlashSale, SaleAdjustment, SaleWindow},
    products::Product,
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Map of product key -> product fixture
    pub products: FxHashMap<String, ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name
    pub name: String,

    /// Product price (e.g., "100000 VND")
    pub price: String,

    /// Optional slashed-out reference price
    pub old_price: Option<String>,

    /// Units in stock
    pub stock: u32,

    /// Optional flash sale attached to the product
    pub flash_sale: Option<FlashSaleFixture>,
}

/// Flash sale fixture, in the storefront's original wire shape: a string
/// `value` whose meaning depends on `type`, and a window described by
/// `time_type` plus `expire` (once) or `duration` in minutes (loop).
#[derive(Debug, Deserialize)]
pub struct FlashSaleFixture {
    /// Adjustment kind
    #[serde(rename = "type")]
    pub kind: AdjustmentKindFixture,

    /// String-encoded signed number; an amount for the fixed kinds, a
    /// percentage (e.g. "-20") for the percentage kind
    pub value: String,

    /// Start of the sale
    pub begin: DateTime<Utc>,

    /// Whether the sale runs once or recurs
    pub time_type: TimeTypeFixture,

    /// End of the window (required for `once`)
    pub expire: Option<DateTime<Utc>>,

    /// Recurrence period in whole minutes (required for `loop`)
    pub duration: Option<i64>,
}

/// Adjustment kind tags, matching the original `fixed-reduce` / `fixed` /
/// `percentage` strings.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AdjustmentKindFixture {
    /// Signed delta added to the base price
    FixedReduce,

    /// Absolute price override
    Fixed,

    /// Signed percentage of the base price
    Percentage,
}

/// Window kind tags.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TimeTypeFixture {
    /// One-shot window ending at `expire`
    Once,

    /// Recurs every `duration` minutes
    Loop,
}

impl ProductFixture {
    /// Convert to a [`Product`], returning the currency parsed from the
    /// price string so the caller can enforce cross-product consistency.
    ///
    /// # Errors
    ///
    /// Returns an error if any price, amount or percentage string is
    /// malformed, or if the sale window is incomplete.
    pub fn try_into_product(
        self,
    ) -> Result<(Product<'static>, &'static Currency), FixtureError> {
        let (minor_units, currency) = parse_price(&self.price)?;
        let price = Money::from_minor(minor_units, currency);

        let old_price = self
            .old_price
            .as_deref()
            .map(|s| {
                let (old_minor, old_currency) = parse_price(s)?;

                if old_currency != currency {
                    return Err(FixtureError::CurrencyMismatch(
                        currency.iso_alpha_code.to_string(),
                        old_currency.iso_alpha_code.to_string(),
                    ));
                }

                Ok(Money::from_minor(old_minor, currency))
            })
            .transpose()?;

        let flash_sale = self
            .flash_sale
            .map(|sale| sale.try_into_sale(currency))
            .transpose()?;

        Ok((
            Product {
                name: self.name,
                price,
                old_price,
                stock: self.stock,
                flash_sale,
            },
            currency,
        ))
    }
}

impl FlashSaleFixture {
    /// Convert to a [`FlashSale`] in the given currency.
    ///
    /// This is the parsing boundary for the original's string-encoded
    /// `value` field: the computation core only ever sees typed money and
    /// percentage values.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is malformed, a `once` sale has no
    /// `expire`, or a `loop` sale has no positive `duration`.
    pub fn try_into_sale(
        self,
        currency: &'static Currency,
    ) -> Result<FlashSale<'static>, FixtureError> {
        let adjustment = match self.kind {
            AdjustmentKindFixture::FixedReduce => {
                SaleAdjustment::AmountOff(Money::from_minor(
                    parse_amount(&self.value, currency)?,
                    currency,
                ))
            }
            AdjustmentKindFixture::Fixed => SaleAdjustment::AmountOverride(Money::from_minor(
                parse_amount(&self.value, currency)?,
                currency,
            )),
            AdjustmentKindFixture::Percentage => {
                SaleAdjustment::PercentageChange(parse_signed_percent(&self.value)?)
            }
        };

        let window = match self.time_type {
            TimeTypeFixture::Once => {
                let expire = self.expire.ok_or_else(|| {
                    FixtureError::InvalidSaleWindow("once sale requires expire".to_string())
                })?;

                SaleWindow::Once { expire }
            }
            TimeTypeFixture::Loop => {
                let period_minutes = self.duration.filter(|d| *d >= 1).ok_or_else(|| {
                    FixtureError::InvalidSaleWindow(
                        "loop sale requires a positive duration in minutes".to_string(),
                    )
                })?;

                SaleWindow::Loop { period_minutes }
            }
        };

        Ok(FlashSale::new(adjustment, self.begin, window))
    }
}

/// Parse a price string (e.g., "100000 VND") into minor units and currency,
/// scaling by the currency's exponent.
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed, or if the currency code is not
/// recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let currency_code = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "VND" => VND,
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    let amount = parts
        .first()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok((parse_amount(amount, currency)?, currency))
}

/// Parse a bare signed amount string (e.g., "-15000") into minor units of
/// the given currency.
///
/// # Errors
///
/// Returns an error if the string is not a number or does not fit in minor
/// units.
pub fn parse_amount(s: &str, currency: &'static Currency) -> Result<i64, FixtureError> {
    let amount = s
        .trim()
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidAmount(s.to_string()))?;

    let factor = Decimal::from(10_i64.pow(currency.exponent));

    amount
        .checked_mul(factor)
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidAmount(s.to_string()))
}

/// Parse a signed percentage string in the original's convention
/// (e.g., "-20" for 20% off) into a [`Percentage`] fraction.
///
/// # Errors
///
/// Returns an error if the string is not a number.
pub fn parse_signed_percent(s: &str) -> Result<Percentage, FixtureError> {
    let value = s
        .trim()
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?;

    let fraction = value
        .checked_div(Decimal::ONE_HUNDRED)
        .ok_or_else(|| FixtureError::InvalidPercentage(s.to_string()))?;

    Ok(Percentage::from(fraction))
}
