//! Fixtures
//!
//! YAML fixture sets for the catalog, vouchers and carts. This is the data
//! edge of the crate: string-encoded amounts, percentages and window fields
//! are validated and parsed into typed values here, so the pricing core
//! never sees raw strings.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use thiserror::Error;

use crate::{
    cart::{Cart, Line},
    fixtures::{carts::CartFixture, products::ProductsFixture, vouchers::VouchersFixture},
    products::{Product, ProductKey},
    vouchers::Voucher,
};

pub mod carts;
pub mod products;
pub mod vouchers;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid amount format
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Incomplete or contradictory sale window
    #[error("Invalid sale window: {0}")]
    InvalidSaleWindow(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Voucher not found
    #[error("Voucher not found: {0}")]
    VoucherNotFound(String),

    /// Currency mismatch between fixtures
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,

    /// No cart lines loaded
    #[error("No cart lines loaded")]
    NoLines,
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Catalog snapshot with generated keys
    product_meta: SlotMap<ProductKey, Product<'a>>,

    /// String key -> `SlotMap` key mappings for lookups
    product_keys: FxHashMap<String, ProductKey>,

    /// Vouchers by code
    vouchers: FxHashMap<String, Voucher<'a>>,

    /// Cart lines (referencing products by `ProductKey`)
    lines: Vec<Line>,

    /// Currency for the fixture set
    currency: Option<&'static rusty_money::iso::Currency>,
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            product_meta: SlotMap::with_key(),
            product_keys: FxHashMap::default(),
            vouchers: FxHashMap::default(),
            lines: Vec::new(),
            currency: None,
        }
    }

    /// Load products (with any attached flash sales) from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if there
    /// are currency mismatches across products.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ProductsFixture = serde_norway::from_str(&contents)?;

        for (key, product_fixture) in fixture.products {
            let (product, currency) = product_fixture.try_into_product()?;

            if let Some(existing_currency) = self.currency {
                if existing_currency != currency {
                    return Err(FixtureError::CurrencyMismatch(
                        existing_currency.iso_alpha_code.to_string(),
                        currency.iso_alpha_code.to_string(),
                    ));
                }
            } else {
                self.currency = Some(currency);
            }

            let product_key = self.product_meta.insert(product);

            self.product_keys.insert(key, product_key);
        }

        Ok(self)
    }

    /// Load vouchers from a YAML fixture file
    ///
    /// Products must be loaded first, since voucher amounts are denominated
    /// in the catalog currency.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if no currency
    /// is known yet, or if a voucher value is malformed.
    pub fn load_vouchers(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let currency = self.currency.ok_or(FixtureError::NoCurrency)?;

        let file_path = self.base_path.join("vouchers").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: VouchersFixture = serde_norway::from_str(&contents)?;

        for (code, voucher_fixture) in fixture.vouchers {
            let voucher = voucher_fixture.try_into_voucher(currency)?;

            self.vouchers.insert(code, voucher);
        }

        Ok(self)
    }

    /// Load cart lines from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a line
    /// references a product that was not loaded.
    pub fn load_cart(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("carts").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CartFixture = serde_norway::from_str(&contents)?;

        for line_fixture in fixture.lines {
            let product_key = self
                .product_keys
                .get(&line_fixture.product)
                .ok_or_else(|| FixtureError::ProductNotFound(line_fixture.product.clone()))?;

            self.lines.push(Line {
                product: *product_key,
                quantity: line_fixture.quantity,
                selected: line_fixture.selected,
            });
        }

        Ok(self)
    }

    /// Load a complete fixture set (products, vouchers, and a cart with the
    /// same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture
            .load_products(name)?
            .load_vouchers(name)?
            .load_cart(name)?;

        Ok(fixture)
    }

    /// Get a product by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, key: &str) -> Result<&Product<'a>, FixtureError> {
        let product_key = self.product_key(key)?;

        self.product_meta
            .get(product_key)
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// Get a product key by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product_key(&self, key: &str) -> Result<ProductKey, FixtureError> {
        self.product_keys
            .get(key)
            .copied()
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// Get a voucher by its code
    ///
    /// # Errors
    ///
    /// Returns an error if the voucher is not found.
    pub fn voucher(&self, code: &str) -> Result<&Voucher<'a>, FixtureError> {
        self.vouchers
            .get(code)
            .ok_or_else(|| FixtureError::VoucherNotFound(code.to_string()))
    }

    /// Get the catalog snapshot
    pub fn catalog(&self) -> &SlotMap<ProductKey, Product<'a>> {
        &self.product_meta
    }

    /// Get the loaded cart lines
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Create a cart from the loaded lines
    ///
    /// # Errors
    ///
    /// Returns an error if no currency is known or no lines are loaded.
    pub fn cart(&self) -> Result<Cart, FixtureError> {
        let currency = self.currency.ok_or(FixtureError::NoCurrency)?;

        if self.lines.is_empty() {
            return Err(FixtureError::NoLines);
        }

        Ok(Cart::with_lines(self.lines.iter().copied(), currency))
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn currency(&self) -> Result<&'static rusty_money::iso::Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}
