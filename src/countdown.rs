//! Countdown
//!
//! Display-facing time remaining until a flash-sale boundary, in whole
//! hours/minutes/seconds. The countdown is a pure function of `(target,
//! now)`; the caller re-evaluates it on its own refresh interval (typically
//! once per second) and simply stops calling when the display unmounts.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::flash_sales::FlashSale;

/// Whole hours/minutes/seconds remaining until a boundary.
///
/// Once the boundary has passed the countdown freezes at zero; it never goes
/// negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    hours: i64,
    minutes: i64,
    seconds: i64,
}

impl Countdown {
    /// A finished countdown.
    pub fn zero() -> Self {
        Self {
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }

    /// The countdown from `now` until `target`, frozen at zero once `target`
    /// has passed.
    pub fn until(target: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let secs = (target - now).num_seconds().max(0);

        Self {
            hours: secs / 3_600,
            minutes: (secs % 3_600) / 60,
            seconds: secs % 60,
        }
    }

    /// The countdown to the next boundary of a sale, if one is computable.
    pub fn to_sale_boundary(sale: &FlashSale<'_>, now: DateTime<Utc>) -> Option<Self> {
        sale.next_boundary(now).map(|target| Self::until(target, now))
    }

    /// Whole hours remaining.
    pub fn hours(&self) -> i64 {
        self.hours
    }

    /// Whole minutes remaining within the hour.
    pub fn minutes(&self) -> i64 {
        self.minutes
    }

    /// Whole seconds remaining within the minute.
    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Whether the countdown has reached zero.
    pub fn is_finished(&self) -> bool {
        self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}
