//! Receipt
//!
//! Checkout-facing view of computed cart totals, plus a rendered line-item
//! table for terminal output.

use chrono::{DateTime, Utc};
use rusty_money::{Money, MoneyError, iso::Currency};
use slotmap::SlotMap;
use tabled::{Table, Tabled};

use crate::{
    cart::{Cart, CartError, CartTotals},
    pricing::unit_price,
    products::{Product, ProductKey},
};

/// Final receipt for a priced cart.
#[derive(Debug, Clone, Copy)]
pub struct Receipt<'a> {
    subtotal: Money<'a, Currency>,
    discount: Money<'a, Currency>,
    total: Money<'a, Currency>,
}

impl<'a> Receipt<'a> {
    /// Create a receipt from computed cart totals.
    pub fn from_totals(totals: &CartTotals<'a>) -> Self {
        Self {
            subtotal: totals.subtotal,
            discount: totals.discount,
            total: totals.total,
        }
    }

    /// Sum of selected line totals before the voucher.
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Signed voucher discount.
    pub fn discount(&self) -> Money<'a, Currency> {
        self.discount
    }

    /// Amount payable.
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// How much the customer saved relative to the raw subtotal.
    ///
    /// Negative savings are possible with a total-override voucher whose
    /// amount exceeds the subtotal; callers decide how to present that.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction fails.
    pub fn savings(&self) -> Result<Money<'a, Currency>, MoneyError> {
        self.subtotal.sub(self.total)
    }
}

/// One row of the rendered line-item table.
#[derive(Debug, Tabled)]
pub struct LineSummary {
    /// Product name
    #[tabled(rename = "Product")]
    pub name: String,

    /// Units purchased
    #[tabled(rename = "Qty")]
    pub quantity: u32,

    /// Effective unit price at evaluation time
    #[tabled(rename = "Unit price")]
    pub unit_price: String,

    /// Quantity x unit price
    #[tabled(rename = "Line total")]
    pub line_total: String,
}

/// Build table rows for the selected lines of a cart, using sale-aware unit
/// prices at `now`.
///
/// # Errors
///
/// Returns a [`CartError`] if a line references a missing product or a line
/// total overflows.
pub fn line_summaries(
    cart: &Cart,
    catalog: &SlotMap<ProductKey, Product<'_>>,
    now: DateTime<Utc>,
) -> Result<Vec<LineSummary>, CartError> {
    let mut rows = Vec::with_capacity(cart.len());

    for (index, line) in cart.iter().enumerate() {
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

        rows.push(LineSummary {
            name: product.name.clone(),
            quantity: line.quantity,
            unit_price: unit.to_string(),
            line_total: Money::from_minor(line_minor, unit.currency()).to_string(),
        });
    }

    Ok(rows)
}

/// Render line summaries as a text table.
pub fn render_table(rows: &[LineSummary]) -> String {
    Table::new(rows).to_string()
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use crate::cart::Line;

    use super::*;

    fn vnd(minor: i64) -> Money<'static, Currency> {
        Money::from_minor(minor, iso::VND)
    }

    fn totals<'a>(subtotal: i64, discount: i64, total: i64) -> CartTotals<'a> {
        CartTotals {
            subtotal: vnd(subtotal),
            discount: vnd(discount),
            total: vnd(total),
        }
    }

    #[test]
    fn accessors_return_totals() {
        let receipt = Receipt::from_totals(&totals(280_000, -10_000, 270_000));

        assert_eq!(receipt.subtotal(), vnd(280_000));
        assert_eq!(receipt.discount(), vnd(-10_000));
        assert_eq!(receipt.total(), vnd(270_000));
    }

    #[test]
    fn savings_is_subtotal_minus_total() -> TestResult {
        let receipt = Receipt::from_totals(&totals(280_000, -10_000, 270_000));

        assert_eq!(receipt.savings()?, vnd(10_000));

        Ok(())
    }

    #[test]
    fn savings_can_be_negative_under_total_override() -> TestResult {
        let receipt = Receipt::from_totals(&totals(10_000, 30_000, 30_000));

        assert_eq!(receipt.savings()?, vnd(-20_000));

        Ok(())
    }

    #[test]
    fn line_summaries_cover_selected_lines() -> TestResult {
        let mut catalog = SlotMap::with_key();
        let streaming = catalog.insert(Product {
            name: "Streaming Plus (1 month)".to_string(),
            price: vnd(100_000),
            old_price: None,
            stock: 25,
            flash_sale: None,
        });
        let music = catalog.insert(Product {
            name: "Music Family (1 month)".to_string(),
            price: vnd(65_000),
            old_price: None,
            stock: 10,
            flash_sale: None,
        });

        let mut cart = Cart::new(iso::VND);
        cart.push_line(Line::new(streaming, 2));
        cart.push_line(Line {
            product: music,
            quantity: 1,
            selected: false,
        });

        let now = "2026-06-15T12:00:00Z"
            .parse()
            .unwrap_or(DateTime::UNIX_EPOCH);
        let rows = line_summaries(&cart, &catalog, now)?;

        assert_eq!(rows.len(), 1);

        let row = rows.first().ok_or("missing row")?;

        assert_eq!(row.name, "Streaming Plus (1 month)");
        assert_eq!(row.quantity, 2);

        let table = render_table(&rows);

        assert!(table.contains("Streaming Plus (1 month)"));

        Ok(())
    }
}
