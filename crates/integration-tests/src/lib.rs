//! Integration tests for Cartkeeper.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cartkeeper-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_store` - Cart store behavior across core and storefront
//! - `theme_preference` - Theme preference resolution and persistence
//! - `file_storage` - Cart and theme sharing one storage file

use cartkeeper_core::{Price, Product, ProductError};

/// Build a product from text fields, as an add-to-cart control would.
///
/// # Errors
///
/// Returns the validation error for invalid fields.
pub fn product(id: &str, name: &str, price: &str) -> Result<Product, ProductError> {
    let price = Price::parse(price)?;
    Product::new(id, name, price, None)
}
