//! Command dispatch for cart controls.
//!
//! Each UI control maps to one [`CartCommand`]. Add-to-cart controls hand
//! over the raw text they carry; validation happens here so every input path
//! rejects bad payloads the same way.

use serde::Deserialize;
use tracing::instrument;

use cartkeeper_core::Product;

use super::CartStore;
use super::order::OrderConfirmation;
use crate::error::{CartError, Result};
use crate::storage::KeyValueStorage;

/// Unvalidated product data gathered from an add-to-cart control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawProduct {
    pub id: Option<String>,
    pub name: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
}

impl RawProduct {
    /// Validate into a [`Product`].
    ///
    /// # Errors
    ///
    /// Returns the first validation failure (ID, then name, then price).
    pub fn validate(&self) -> std::result::Result<Product, cartkeeper_core::ProductError> {
        Product::from_raw(
            self.id.as_deref(),
            self.name.as_deref(),
            self.price.as_deref(),
            self.image.as_deref(),
        )
    }
}

/// A user action on the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartCommand {
    /// Add one unit of a product.
    Add(RawProduct),
    /// Remove a product's line.
    Remove(String),
    /// Empty the cart.
    Clear,
    /// Submit the cart as an order, emptying it.
    SubmitOrder,
}

/// Result of a dispatched command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A product was added; `quantity` is the line's new quantity.
    Added { id: String, quantity: u32 },
    /// A remove was applied; `removed` is false if the product was absent.
    Removed { id: String, removed: bool },
    /// The cart was emptied.
    Cleared,
    /// The command carried nothing to act on and was skipped.
    Ignored,
    /// The order was submitted.
    OrderSubmitted(OrderConfirmation),
}

impl<S: KeyValueStorage> CartStore<S> {
    /// Run a command against the store.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidProduct`] for an add with missing or
    /// malformed fields (logged, cart unchanged), and any error from the
    /// underlying store operation.
    #[instrument(skip_all)]
    pub fn dispatch(&mut self, command: CartCommand) -> Result<CommandOutcome> {
        match command {
            CartCommand::Add(raw) => {
                let product = raw.validate().map_err(|e| {
                    tracing::warn!(product = ?raw, error = %e, "Product missing required data");
                    CartError::InvalidProduct(e)
                })?;
                let quantity = self.add_item(&product)?;
                Ok(CommandOutcome::Added {
                    id: product.id().to_string(),
                    quantity,
                })
            }
            CartCommand::Remove(id) => {
                if id.is_empty() {
                    tracing::debug!("Remove without a product id ignored");
                    return Ok(CommandOutcome::Ignored);
                }
                let removed = self.remove_item(&id)?;
                Ok(CommandOutcome::Removed { id, removed })
            }
            CartCommand::Clear => {
                self.clear()?;
                Ok(CommandOutcome::Cleared)
            }
            CartCommand::SubmitOrder => Ok(CommandOutcome::OrderSubmitted(self.submit_order()?)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use cartkeeper_core::{Cart, ProductError};

    use super::*;
    use crate::storage::MemoryStorage;

    fn raw(id: &str, name: &str, price: &str) -> RawProduct {
        RawProduct {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            price: Some(price.to_string()),
            image: None,
        }
    }

    #[test]
    fn test_add_command() {
        let mut store = CartStore::new(MemoryStorage::new());
        let outcome = store.dispatch(CartCommand::Add(raw("a", "Tee", "5"))).unwrap();

        assert_eq!(
            outcome,
            CommandOutcome::Added {
                id: "a".to_string(),
                quantity: 1
            }
        );
    }

    #[test]
    fn test_add_rejects_empty_id_without_notifying() {
        let notified = Rc::new(RefCell::new(false));
        let mut store = CartStore::new(MemoryStorage::new());
        let flag = Rc::clone(&notified);
        store.subscribe(move |_: &Cart| *flag.borrow_mut() = true);

        let result = store.dispatch(CartCommand::Add(raw("", "X", "5")));

        assert!(matches!(
            result,
            Err(CartError::InvalidProduct(ProductError::EmptyId))
        ));
        assert!(store.load().is_empty());
        assert!(store.storage().is_empty());
        assert!(!*notified.borrow());
    }

    #[test]
    fn test_add_rejects_non_numeric_price() {
        let mut store = CartStore::new(MemoryStorage::new());
        let result = store.dispatch(CartCommand::Add(raw("a", "Tee", "abc")));

        assert!(matches!(
            result,
            Err(CartError::InvalidProduct(ProductError::InvalidPrice(_)))
        ));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_remove_empty_id_ignored() {
        let mut store = CartStore::new(MemoryStorage::new());
        assert_eq!(
            store.dispatch(CartCommand::Remove(String::new())).unwrap(),
            CommandOutcome::Ignored
        );
    }

    #[test]
    fn test_remove_command() {
        let mut store = CartStore::new(MemoryStorage::new());
        store.dispatch(CartCommand::Add(raw("a", "Tee", "5"))).unwrap();

        assert_eq!(
            store.dispatch(CartCommand::Remove("a".to_string())).unwrap(),
            CommandOutcome::Removed {
                id: "a".to_string(),
                removed: true
            }
        );
    }

    #[test]
    fn test_submit_command() {
        let mut store = CartStore::new(MemoryStorage::new());
        store.dispatch(CartCommand::Add(raw("a", "Tee", "5"))).unwrap();

        let outcome = store.dispatch(CartCommand::SubmitOrder).unwrap();
        assert!(matches!(outcome, CommandOutcome::OrderSubmitted(ref c) if c.item_count == 1));
        assert_eq!(store.dispatch(CartCommand::Clear).unwrap(), CommandOutcome::Cleared);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_raw_product_from_json() {
        let raw: RawProduct =
            serde_json::from_str(r#"{"id":"a","name":"Tee","price":"19.99"}"#).unwrap();
        let product = raw.validate().unwrap();
        assert_eq!(product.price().to_string(), "19.99");
        assert_eq!(product.image(), None);
    }
}
