//! Integration tests for GoMarketplace.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p go-marketplace-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart store against the on-disk file store
//! - `cart_scope` - Provider scope access and misuse

use go_marketplace_core::{LineItemInput, Price, ProductId};

/// Build a catalog product for tests.
#[must_use]
pub fn catalog_product(id: &str, cents: i32) -> LineItemInput {
    LineItemInput {
        id: ProductId::from(id),
        title: format!("Product {id}"),
        image_url: format!("https://cdn.example.com/products/{id}.jpg"),
        price: Price::from_cents(cents),
    }
}
