//! Persistent cart store.
//!
//! [`CartStore`] owns the single authoritative cart snapshot, kept as JSON in
//! one storage slot (`"shoppingCart"` by default). Every mutation follows the
//! same path:
//!
//! 1. load the current cart from the slot
//! 2. apply the change
//! 3. write the whole cart back (or delete the slot on clear)
//! 4. notify subscribed observers with the new snapshot
//!
//! There is no partial-update path and nothing is cached between calls, so
//! the slot is always the source of truth.
//!
//! # Example
//!
//! ```
//! use cartkeeper_core::{Price, Product};
//! use cartkeeper_storefront::cart::CartStore;
//! use cartkeeper_storefront::storage::MemoryStorage;
//!
//! let mut store = CartStore::new(MemoryStorage::new());
//! let tee = Product::new("tee", "Tee", Price::from_cents(500).unwrap(), None).unwrap();
//!
//! store.add_item(&tee).unwrap();
//! store.add_item(&tee).unwrap();
//!
//! assert_eq!(store.load().len(), 1);
//! assert_eq!(store.total_items(), 2);
//! ```

mod commands;
mod observer;
mod order;
mod view;

use rust_decimal::Decimal;
use tracing::instrument;

use cartkeeper_core::{Cart, CartLine, Product};

use crate::error::Result;
use crate::storage::{KeyValueStorage, keys};

pub use commands::{CartCommand, CommandOutcome, RawProduct};
pub use observer::{CartObserver, SubscriptionId};
pub use order::{ORDER_SUBMITTED_MESSAGE, OrderConfirmation};
pub use view::{CartDisplay, CartItemView, CartView, EMPTY_CART_MESSAGE, element_ids};

use observer::Observers;

/// Cart state persisted in a key-value slot.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    key: String,
    observers: Observers,
}

impl<S: KeyValueStorage> CartStore<S> {
    /// Create a store using the default `"shoppingCart"` slot.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, keys::CART)
    }

    /// Create a store using a custom slot name.
    #[must_use]
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            observers: Observers::default(),
        }
    }

    /// The slot this store reads and writes.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying storage.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Read the persisted cart.
    ///
    /// An absent slot is an empty cart. So is a slot that is not a JSON
    /// array, or a backend read failure; those cases are logged and never
    /// propagated. Within an array, each line is read on its own: a line
    /// that cannot be read (wrong shape, negative price) or breaks the cart
    /// invariants (zero quantity, empty name, repeated ID) is logged and
    /// skipped, and the remaining lines are kept.
    #[must_use]
    pub fn load(&self) -> Cart {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Cart::new(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to read cart slot, using empty cart");
                return Cart::new();
            }
        };

        let entries = match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Malformed cart data, using empty cart");
                return Cart::new();
            }
        };

        let lines = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value::<CartLine>(entry) {
                Ok(line) => Some(line),
                Err(e) => {
                    tracing::warn!(key = %self.key, index, error = %e, "Skipping unreadable cart line");
                    None
                }
            });
        let (cart, rejected) = Cart::from_lines(lines);
        for e in &rejected {
            tracing::warn!(key = %self.key, error = %e, "Skipping invalid cart line");
        }

        tracing::debug!(key = %self.key, lines = cart.len(), "Cart loaded");
        cart
    }

    /// Write `cart` to the slot, replacing any previous value.
    ///
    /// Does not notify observers.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be serialized or the backend write
    /// fails.
    pub fn save(&self, cart: &Cart) -> Result<()> {
        let json = serde_json::to_string(cart)?;
        self.storage.set_item(&self.key, &json)?;
        tracing::debug!(key = %self.key, lines = cart.len(), "Cart saved");
        Ok(())
    }

    /// Add one unit of `product` and return the line's new quantity.
    ///
    /// A product already in the cart has its quantity incremented; its stored
    /// name, price and image are kept. Otherwise a new line is appended.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be saved. The cart is unchanged
    /// and observers are not notified in that case.
    #[instrument(skip_all, fields(id = %product.id()))]
    pub fn add_item(&mut self, product: &Product) -> Result<u32> {
        let mut cart = self.load();
        let quantity = cart.add(product);
        self.commit(&cart)?;

        tracing::info!(quantity, "Added item to cart");
        Ok(quantity)
    }

    /// Remove the line for `id`. Returns whether a line was removed.
    ///
    /// Removing a product that is not in the cart is a no-op, but still
    /// rewrites the slot and notifies observers.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be saved.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, id: &str) -> Result<bool> {
        let mut cart = self.load();
        let removed = cart.remove(id);
        self.commit(&cart)?;

        if removed {
            tracing::info!("Removed item from cart");
        } else {
            tracing::debug!("Item not in cart, nothing removed");
        }
        Ok(removed)
    }

    /// Empty the cart by deleting its slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be deleted.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> Result<()> {
        self.storage.remove_item(&self.key)?;
        self.observers.notify(&Cart::new());

        tracing::info!(key = %self.key, "Cart cleared");
        Ok(())
    }

    /// Submit the current cart as an order and clear it.
    ///
    /// An empty cart is submitted like any other: the slot is cleared,
    /// observers are notified and the confirmation carries zero items.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be cleared. The cart is left as it
    /// was in that case.
    #[instrument(skip(self))]
    pub fn submit_order(&mut self) -> Result<OrderConfirmation> {
        let cart = self.load();
        let confirmation = OrderConfirmation::new(cart.total_items(), cart.total_price());
        self.clear()?;

        tracing::info!(
            reference = %confirmation.reference,
            items = confirmation.item_count,
            total = %confirmation.total,
            "Order submitted"
        );
        Ok(confirmation)
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.load().total_items()
    }

    /// Sum of `price * quantity` across all lines.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.load().total_price()
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn get_line(&self, id: &str) -> Option<CartLine> {
        self.load().get(id).cloned()
    }

    /// Subscribe to cart changes.
    pub fn subscribe(&mut self, observer: impl CartObserver + 'static) -> SubscriptionId {
        self.observers.subscribe(Box::new(observer))
    }

    /// Stop notifying a subscriber. Returns whether it was subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Number of subscribed observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Notify observers with the current cart without changing it.
    ///
    /// Used to draw the initial display.
    pub fn refresh(&mut self) {
        let cart = self.load();
        self.observers.notify(&cart);
    }

    fn commit(&mut self, cart: &Cart) -> Result<()> {
        self.save(cart)?;
        self.observers.notify(cart);
        Ok(())
    }
}
