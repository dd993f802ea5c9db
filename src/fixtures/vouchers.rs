//! Voucher Fixtures

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;

use crate::{
    fixtures::{
        FixtureError,
        products::{parse_amount, parse_signed_percent},
    },
    vouchers::Voucher,
};

/// Wrapper for vouchers in YAML
#[derive(Debug, Deserialize)]
pub struct VouchersFixture {
    /// Map of voucher code -> voucher fixture
    pub vouchers: FxHashMap<String, VoucherFixture>,
}

/// Voucher fixture, in the storefront's original wire shape: the `type` tag
/// picks the semantics and `value` is a string-encoded signed number.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum VoucherFixture {
    /// Signed delta on the subtotal (conventionally negative)
    FixedReduce {
        /// String-encoded signed amount
        value: String,
    },

    /// Absolute total override
    Fixed {
        /// String-encoded amount
        value: String,
    },

    /// Signed percentage of the subtotal, capped at `max_reduce`
    Percentage {
        /// String-encoded signed percentage (e.g. "-10")
        value: String,

        /// Cap on the absolute discount, as a bare amount
        max_reduce: String,
    },
}

impl VoucherFixture {
    /// Convert to a [`Voucher`] in the given currency.
    ///
    /// # Errors
    ///
    /// Returns an error if a value string is malformed or `max_reduce` is
    /// negative.
    pub fn try_into_voucher(
        self,
        currency: &'static Currency,
    ) -> Result<Voucher<'static>, FixtureError> {
        match self {
            VoucherFixture::FixedReduce { value } => Ok(Voucher::AmountOff(Money::from_minor(
                parse_amount(&value, currency)?,
                currency,
            ))),
            VoucherFixture::Fixed { value } => Ok(Voucher::TotalOverride(Money::from_minor(
                parse_amount(&value, currency)?,
                currency,
            ))),
            VoucherFixture::Percentage { value, max_reduce } => {
                let cap = parse_amount(&max_reduce, currency)?;

                if cap < 0 {
                    return Err(FixtureError::InvalidAmount(max_reduce));
                }

                Ok(Voucher::PercentageOff {
                    rate: parse_signed_percent(&value)?,
                    max_reduce: Money::from_minor(cap, currency),
                })
            }
        }
    }
}
