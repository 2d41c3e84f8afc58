//! Validated add-to-cart payload.

use serde::Serialize;

use super::id::{ProductId, ProductIdError};
use super::price::{Price, PriceError};

/// Errors that can occur when validating a [`Product`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductError {
    /// The product ID is missing or empty.
    #[error("product id is required")]
    EmptyId,
    /// The product name is missing or empty.
    #[error("product name is required")]
    EmptyName,
    /// The price is missing, non-numeric or negative.
    #[error("invalid product price: {0}")]
    InvalidPrice(#[from] PriceError),
}

impl From<ProductIdError> for ProductError {
    fn from(_: ProductIdError) -> Self {
        Self::EmptyId
    }
}

/// A product as offered to the cart.
///
/// Only constructible through validation, so every `Product` has a non-empty
/// ID and name and a non-negative price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Price,
    image: Option<String>,
}

impl Product {
    /// Build a product from already-typed parts.
    ///
    /// An empty `image` is treated as no image.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::EmptyId`] or [`ProductError::EmptyName`] if the
    /// respective field is empty.
    pub fn new(
        id: &str,
        name: &str,
        price: Price,
        image: Option<&str>,
    ) -> Result<Self, ProductError> {
        let id = ProductId::parse(id)?;
        if name.is_empty() {
            return Err(ProductError::EmptyName);
        }

        Ok(Self {
            id,
            name: name.to_owned(),
            price,
            image: image.filter(|url| !url.is_empty()).map(str::to_owned),
        })
    }

    /// Build a product from raw text fields, as gathered from UI controls.
    ///
    /// Fields are checked in order: ID, name, then price.
    ///
    /// # Errors
    ///
    /// Returns the first [`ProductError`] encountered.
    pub fn from_raw(
        id: Option<&str>,
        name: Option<&str>,
        price: Option<&str>,
        image: Option<&str>,
    ) -> Result<Self, ProductError> {
        let id = id.ok_or(ProductError::EmptyId)?;
        let name = name.ok_or(ProductError::EmptyName)?;
        let price = price.ok_or_else(|| PriceError::NotANumber(String::new()))?;
        let price = Price::parse(price)?;
        Self::new(id, name, price, image)
    }

    /// The product ID.
    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.id
    }

    /// The display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The unit price.
    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    /// The image URL, if any.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let product = Product::new("a", "Tee", Price::parse("5").unwrap(), None).unwrap();
        assert_eq!(product.id().as_str(), "a");
        assert_eq!(product.name(), "Tee");
        assert_eq!(product.image(), None);
    }

    #[test]
    fn test_empty_image_is_none() {
        let product = Product::new("a", "Tee", Price::ZERO, Some("")).unwrap();
        assert_eq!(product.image(), None);

        let product = Product::new("a", "Tee", Price::ZERO, Some("/img/tee.jpg")).unwrap();
        assert_eq!(product.image(), Some("/img/tee.jpg"));
    }

    #[test]
    fn test_rejects_empty_id() {
        assert_eq!(
            Product::new("", "Tee", Price::ZERO, None),
            Err(ProductError::EmptyId)
        );
    }

    #[test]
    fn test_rejects_empty_name() {
        assert_eq!(
            Product::new("a", "", Price::ZERO, None),
            Err(ProductError::EmptyName)
        );
    }

    #[test]
    fn test_from_raw() {
        let product = Product::from_raw(Some("a"), Some("Tee"), Some("19.99"), Some("")).unwrap();
        assert_eq!(product.price().to_string(), "19.99");
    }

    #[test]
    fn test_from_raw_missing_fields() {
        assert_eq!(
            Product::from_raw(None, Some("Tee"), Some("5"), None),
            Err(ProductError::EmptyId)
        );
        assert_eq!(
            Product::from_raw(Some("a"), None, Some("5"), None),
            Err(ProductError::EmptyName)
        );
        assert!(matches!(
            Product::from_raw(Some("a"), Some("Tee"), None, None),
            Err(ProductError::InvalidPrice(PriceError::NotANumber(_)))
        ));
        assert!(matches!(
            Product::from_raw(Some("a"), Some("Tee"), Some("free"), None),
            Err(ProductError::InvalidPrice(PriceError::NotANumber(_)))
        ));
    }
}
