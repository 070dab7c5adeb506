//! Integration tests for Shopfront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_store` - Cart store behaviour across persistence adapters
//! - `checkout` - Checkout quotes built from a live cart
//!
//! This library holds the fixtures shared by the test files.

use rust_decimal::Decimal;
use shopfront_core::{Product, ProductId, Quantity};

/// A catalog product with a whole-unit price.
#[must_use]
pub fn product(id: i32, price: i64) -> Product {
    Product::new(ProductId::new(id), format!("Product {id}"), Decimal::new(price, 0))
}

/// A validated quantity.
///
/// # Panics
///
/// Panics if `n` is not a valid quantity.
#[must_use]
#[allow(clippy::expect_used)]
pub fn qty(n: i64) -> Quantity {
    Quantity::new(n).expect("test quantity must be positive")
}

/// A whole-unit decimal amount.
#[must_use]
pub fn amount(n: i64) -> Decimal {
    Decimal::new(n, 0)
}
