//! Flashcart prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartTotals, Line},
    countdown::Countdown,
    fixtures::{Fixture, FixtureError},
    flash_sales::{FlashSale, SaleAdjustment, SaleWindow},
    pricing::{PricingError, unit_price},
    products::{Product, ProductKey},
    quantity::{QuantityEditor, clamp_quantity},
    receipt::{LineSummary, Receipt, line_summaries, render_table},
    vouchers::{Voucher, VoucherOutcome, apply_voucher},
};
