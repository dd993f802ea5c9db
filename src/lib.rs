#![feature(int_roundings)]
//! Flashcart
//!
//! Flashcart is a pricing and discount engine for digital-goods storefronts:
//! flash-sale price overlays, voucher discounts, cart totals and the
//! supporting display values (countdowns, receipts), all evaluated as pure
//! functions of a catalog snapshot and an injected clock.

pub mod cart;
pub mod countdown;
pub mod fixtures;
pub mod flash_sales;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod quantity;
pub mod receipt;
pub mod utils;
pub mod vouchers;
