//! Flash Sales
//!
//! A flash sale is a time-boxed or recurring price override attached to a
//! product. Activity and pricing are pure functions of a caller-supplied
//! `now` instant; nothing here reads the clock.

use chrono::{DateTime, TimeDelta, Utc};
use decimal_percentage::Percentage;
use rusty_money::{Money, iso::Currency};

use crate::pricing::{PricingError, ensure_same_currency, floor_at_zero, percent_of_minor_floored};

/// How an active sale adjusts the base unit price.
#[derive(Debug, Clone, Copy)]
pub enum SaleAdjustment<'a> {
    /// Add a signed delta to the base price (conventionally negative).
    AmountOff(Money<'a, Currency>),

    /// Replace the base price with an absolute amount.
    AmountOverride(Money<'a, Currency>),

    /// Add a signed percentage of the base price (conventionally negative),
    /// floored to whole minor units.
    PercentageChange(Percentage),
}

/// When a sale runs relative to its `begin` instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleWindow {
    /// Runs exactly once, ending at `expire`.
    Once {
        /// End of the sale window
        expire: DateTime<Utc>,
    },

    /// Recurs every `period_minutes` indefinitely once `begin` has passed.
    Loop {
        /// Length of one recurrence, in whole minutes (at least 1)
        period_minutes: i64,
    },
}

/// A flash sale: a price adjustment plus the window it runs in.
#[derive(Debug, Clone, Copy)]
pub struct FlashSale<'a> {
    adjustment: SaleAdjustment<'a>,
    begin: DateTime<Utc>,
    window: SaleWindow,
}

impl<'a> FlashSale<'a> {
    /// Create a new flash sale.
    pub fn new(adjustment: SaleAdjustment<'a>, begin: DateTime<Utc>, window: SaleWindow) -> Self {
        Self {
            adjustment,
            begin,
            window,
        }
    }

    /// The price adjustment applied while the sale is active.
    pub fn adjustment(&self) -> &SaleAdjustment<'a> {
        &self.adjustment
    }

    /// The instant the sale starts.
    pub fn begin(&self) -> DateTime<Utc> {
        self.begin
    }

    /// The sale window.
    pub fn window(&self) -> SaleWindow {
        self.window
    }

    /// Whether the sale is active at `now` for a product with `stock` units
    /// left.
    ///
    /// Sold-out products (`stock == 0`) never have an active sale, regardless
    /// of the window. A `Once` sale is active strictly between `begin` and
    /// `expire`; a `Loop` sale is active from `begin` onward with no upper
    /// bound (the recurrence only matters for the countdown boundary).
    pub fn is_active(&self, stock: u32, now: DateTime<Utc>) -> bool {
        if stock == 0 {
            return false;
        }

        match self.window {
            SaleWindow::Once { expire } => now > self.begin && now < expire,
            SaleWindow::Loop { .. } => now >= self.begin,
        }
    }

    /// The sale price for a base unit price, assuming the sale is active.
    ///
    /// All adjustment kinds are floored at zero: a sale can reduce a price to
    /// free, never below.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] on currency mismatch between the adjustment
    /// and the base price, or if the arithmetic overflows.
    pub fn sale_price(
        &self,
        base: Money<'a, Currency>,
    ) -> Result<Money<'a, Currency>, PricingError> {
        match self.adjustment {
            SaleAdjustment::AmountOff(delta) => Ok(floor_at_zero(base.add(delta)?)),
            SaleAdjustment::AmountOverride(amount) => {
                ensure_same_currency(base.currency(), amount.currency())?;
                Ok(floor_at_zero(amount))
            }
            SaleAdjustment::PercentageChange(rate) => {
                let delta = percent_of_minor_floored(&rate, base.to_minor_units())?;
                let adjusted = base.add(Money::from_minor(delta, base.currency()))?;

                Ok(floor_at_zero(adjusted))
            }
        }
    }

    /// The next window boundary after `now`, for countdown display.
    ///
    /// For a `Once` sale this is simply `expire`. For a `Loop` sale it is the
    /// smallest `begin + k * period` (whole periods, `k >= 1`) not in the
    /// past; when `now` sits exactly on a boundary, that boundary is returned
    /// and the countdown reads zero.
    ///
    /// Returns `None` only if the boundary is not representable (degenerate
    /// period or arithmetic overflow).
    pub fn next_boundary(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self.window {
            SaleWindow::Once { expire } => Some(expire),
            SaleWindow::Loop { period_minutes } => {
                let period_secs = period_minutes.checked_mul(60)?;
                if period_secs <= 0 {
                    return None;
                }

                let elapsed_secs = (now - self.begin).num_seconds();
                let k = if elapsed_secs <= 0 {
                    1
                } else {
                    elapsed_secs.div_ceil(period_secs)
                };

                let offset = TimeDelta::try_seconds(k.checked_mul(period_secs)?)?;

                self.begin.checked_add_signed(offset)
            }
        }
    }
}
