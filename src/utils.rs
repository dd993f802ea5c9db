//! Utils

use chrono::{DateTime, Utc};
use clap::Parser;

/// Arguments for the storefront demo
#[derive(Debug, Parser)]
pub struct StorefrontArgs {
    /// Fixture set to use for the catalog, vouchers and cart
    #[clap(short, long, default_value = "storefront")]
    pub fixture: String,

    /// Voucher code to apply at checkout
    #[clap(short, long)]
    pub voucher: Option<String>,

    /// Evaluation instant (RFC 3339); defaults to the current time
    #[clap(short, long)]
    pub now: Option<DateTime<Utc>>,
}
