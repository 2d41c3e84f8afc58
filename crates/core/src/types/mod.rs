//! Core types for Cartkeeper.
//!
//! This module provides type-safe wrappers for the cart and theme domain.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;
pub mod theme;

pub use cart::{Cart, CartInvariantError, CartLine};
pub use id::{ProductId, ProductIdError};
pub use price::{CurrencyCode, Price, PriceError};
pub use product::{Product, ProductError};
pub use theme::{Theme, ThemeError};
