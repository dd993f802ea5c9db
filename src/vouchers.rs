//! Vouchers
//!
//! Numeric effect of a checkout voucher on a cart subtotal. Eligibility
//! (code lookup, expiry, per-email usage limits) is validated upstream; a
//! `Voucher` here has already passed those checks.

use decimal_percentage::Percentage;
use rusty_money::{Money, iso::Currency};

use crate::pricing::{PricingError, ensure_same_currency, floor_at_zero, percent_of_minor};

/// A pre-validated voucher, reduced to its numeric effect.
#[derive(Debug, Clone, Copy)]
pub enum Voucher<'a> {
    /// Add a signed delta to the subtotal (conventionally negative).
    AmountOff(Money<'a, Currency>),

    /// Set the total outright, regardless of the subtotal. The total may
    /// exceed the raw subtotal; this is the documented minimum-charge
    /// semantics of the `fixed` voucher type.
    TotalOverride(Money<'a, Currency>),

    /// Add a signed percentage of the subtotal (conventionally negative),
    /// with the absolute discount capped at `max_reduce`.
    PercentageOff {
        /// Signed discount rate
        rate: Percentage,

        /// Cap on the absolute discount amount
        max_reduce: Money<'a, Currency>,
    },
}

/// The result of applying a voucher to a subtotal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoucherOutcome<'a> {
    /// Signed discount amount (negative reduces the total)
    pub discount: Money<'a, Currency>,

    /// Total after the voucher
    pub total: Money<'a, Currency>,
}

/// Apply an optional voucher to a subtotal.
///
/// No voucher means no discount: the total is the subtotal unchanged. The
/// total is floored at zero for the delta and percentage kinds; a
/// `TotalOverride` sets the total directly.
///
/// # Errors
///
/// Returns a [`PricingError`] on currency mismatch between the voucher and
/// the subtotal, or if the percentage arithmetic overflows.
pub fn apply_voucher<'a>(
    voucher: Option<&Voucher<'a>>,
    subtotal: Money<'a, Currency>,
) -> Result<VoucherOutcome<'a>, PricingError> {
    let Some(voucher) = voucher else {
        return Ok(VoucherOutcome {
            discount: Money::from_minor(0, subtotal.currency()),
            total: subtotal,
        });
    };

    match *voucher {
        Voucher::AmountOff(delta) => Ok(VoucherOutcome {
            discount: delta,
            total: floor_at_zero(subtotal.add(delta)?),
        }),
        Voucher::TotalOverride(amount) => {
            ensure_same_currency(subtotal.currency(), amount.currency())?;

            Ok(VoucherOutcome {
                discount: amount,
                total: amount,
            })
        }
        Voucher::PercentageOff { rate, max_reduce } => {
            ensure_same_currency(subtotal.currency(), max_reduce.currency())?;

            let raw = percent_of_minor(&rate, subtotal.to_minor_units())?;
            let cap = max_reduce.to_minor_units();

            // A cap always reduces the total, never increases it: when the raw
            // discount magnitude exceeds the cap, the discount becomes -cap.
            let discount_minor = if raw.abs() > cap { -cap } else { raw };
            let discount = Money::from_minor(discount_minor, subtotal.currency());

            Ok(VoucherOutcome {
                discount,
                total: floor_at_zero(subtotal.add(discount)?),
            })
        }
    }
}
