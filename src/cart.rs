//! Cart
//!
//! A cart is a list of lines (product key, quantity, selected flag) plus a
//! currency. Totals are computed against a caller-supplied catalog snapshot
//! and an injected `now` instant; the cart holds no money of its own.

use chrono::{DateTime, Utc};
use rusty_money::{Money, MoneyError, iso::Currency};
use slotmap::SlotMap;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    pricing::{PricingError, unit_price},
    products::{Product, ProductKey},
    vouchers::{Voucher, apply_voucher},
};

/// Errors related to cart totals.
#[derive(Debug, Error)]
pub enum CartError {
    /// A line references a product missing from the catalog snapshot.
    #[error("Line {0} references a product that is not in the catalog")]
    ProductNotFound(usize),

    /// A line was not found in the cart.
    #[error("Line {0} not found")]
    LineNotFound(usize),

    /// A line total overflowed minor-unit arithmetic.
    #[error("Line {0} total overflowed")]
    LineOverflow(usize),

    /// Wrapped pricing or voucher evaluation error.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// One product + quantity entry within a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    /// The product this line refers to
    pub product: ProductKey,

    /// Units of the product in the cart
    pub quantity: u32,

    /// Whether the line is checked for checkout; unselected lines never
    /// contribute to totals
    pub selected: bool,
}

impl Line {
    /// Create a new, selected line.
    pub fn new(product: ProductKey, quantity: u32) -> Self {
        Self {
            product,
            quantity,
            selected: true,
        }
    }
}

/// Computed cart totals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartTotals<'a> {
    /// Sum of quantity x effective unit price over selected lines
    pub subtotal: Money<'a, Currency>,

    /// Signed voucher discount (zero when no voucher)
    pub discount: Money<'a, Currency>,

    /// Final total after the voucher
    pub total: Money<'a, Currency>,
}

/// Cart
#[derive(Debug)]
pub struct Cart {
    lines: SmallVec<[Line; 8]>,
    currency: &'static Currency,
}

impl Cart {
    /// Create a new empty cart.
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: SmallVec::new(),
            currency,
        }
    }

    /// Create a new cart with the given lines.
    pub fn with_lines(lines: impl IntoIterator<Item = Line>, currency: &'static Currency) -> Self {
        Cart {
            lines: lines.into_iter().collect(),
            currency,
        }
    }

    /// Add a line to the cart.
    pub fn push_line(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// Get a line by its index.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if the index is out of range.
    pub fn line(&self, index: usize) -> Result<&Line, CartError> {
        self.lines.get(index).ok_or(CartError::LineNotFound(index))
    }

    /// Get a mutable line by its index, for quantity or selection edits.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if the index is out of range.
    pub fn line_mut(&mut self, index: usize) -> Result<&mut Line, CartError> {
        self.lines
            .get_mut(index)
            .ok_or(CartError::LineNotFound(index))
    }

    /// Iterate over the lines in the cart.
    pub fn iter(&self) -> std::slice::Iter<'_, Line> {
        self.lines.iter()
    }

    /// Get the number of lines in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Compute subtotal, discount and total for the selected lines at `now`.
    ///
    /// Each selected line contributes `quantity x effective unit price`,
    /// where the effective price reflects any currently-active flash sale.
    /// The voucher (if any) is applied once to the subtotal. The result is a
    /// pure function of the inputs: calling this twice with the same catalog,
    /// voucher and `now` yields identical totals.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if a line references a missing product, a line
    /// total overflows, or price/voucher arithmetic fails.
    pub fn totals<'a>(
        &self,
        catalog: &SlotMap<ProductKey, Product<'a>>,
        voucher: Option<&Voucher<'a>>,
        now: DateTime<Utc>,
    ) -> Result<CartTotals<'a>, CartError> {
        let mut subtotal = Money::from_minor(0, self.currency);

        for (index, line) in self.lines.iter().enumerate() {
            if !line.selected {
                continue;
            }

            let product = catalog
                .get(line.product)
                .ok_or(CartError::ProductNotFound(index))?;

            let unit = unit_price(product, now)?;
            let line_minor = unit
                .to_minor_units()
                .checked_mul(i64::from(line.quantity))
                .ok_or(CartError::LineOverflow(index))?;

            subtotal = subtotal.add(Money::from_minor(line_minor, unit.currency()))?;
        }

        let outcome = apply_voucher(voucher, subtotal)?;

        Ok(CartTotals {
            subtotal,
            discount: outcome.discount,
            total: outcome.total,
        })
    }
}

impl<'c> IntoIterator for &'c Cart {
    type Item = &'c Line;
    type IntoIter = std::slice::Iter<'c, Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
