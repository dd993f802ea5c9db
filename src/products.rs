//! Products

use rusty_money::{Money, iso::Currency};
use slotmap::new_key_type;

use crate::flash_sales::FlashSale;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// A catalog snapshot of a sellable product.
///
/// `old_price` is display-only (a slashed-out reference price) and never
/// participates in any calculation.
#[derive(Debug, Clone)]
pub struct Product<'a> {
    /// Product name
    pub name: String,

    /// Base unit price
    pub price: Money<'a, Currency>,

    /// Optional slashed-out reference price, for display only
    pub old_price: Option<Money<'a, Currency>>,

    /// Units currently in stock
    pub stock: u32,

    /// Flash sale attached to this product, if any
    pub flash_sale: Option<FlashSale<'a>>,
}

impl<'a> Product<'a> {
    /// The slashed-out price to display next to the current price, if there
    /// is one and it actually exceeds the base price.
    pub fn slashed_price(&self) -> Option<Money<'a, Currency>> {
        self.old_price
            .filter(|old| old.to_minor_units() > self.price.to_minor_units())
    }

    /// Whether the product is sold out.
    pub fn is_sold_out(&self) -> bool {
        self.stock == 0
    }
}
