//! Storefront Demo
//!
//! Loads a fixture set (catalog with flash sales, vouchers, a cart), prices
//! the cart at a given instant, and prints the line items, totals and any
//! running sale countdowns.
//!
//! Run with: `cargo run --example storefront -- --voucher welcome50`

use anyhow::Result;
use chrono::Utc;
use clap::Parser;

use flashcart::{
    countdown::Countdown,
    fixtures::Fixture,
    receipt::{Receipt, line_summaries, render_table},
    utils::StorefrontArgs,
};

/// Storefront Demo
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = StorefrontArgs::parse();
    let now = args.now.unwrap_or_else(Utc::now);

    let fixture = Fixture::from_set(&args.fixture)?;
    let cart = fixture.cart()?;

    let voucher = args
        .voucher
        .as_deref()
        .map(|code| fixture.voucher(code))
        .transpose()?;

    let totals = cart.totals(fixture.catalog(), voucher, now)?;
    let receipt = Receipt::from_totals(&totals);
    let rows = line_summaries(&cart, fixture.catalog(), now)?;

    println!("{}", render_table(&rows));
    println!();
    println!("Subtotal: {}", receipt.subtotal());
    println!("Discount: {}", receipt.discount());
    println!("Total:    {}", receipt.total());
    println!("Savings:  {}", receipt.savings()?);

    for product in fixture.catalog().values() {
        if let Some(sale) = &product.flash_sale
            && sale.is_active(product.stock, now)
            && let Some(countdown) = Countdown::to_sale_boundary(sale, now)
        {
            println!();
            println!("{} is on sale for another {countdown}", product.name);
        }
    }

    Ok(())
}
