//! Cart display data for renderers.
//!
//! Renderers work from a [`CartView`] rather than the raw cart so formatting
//! (currency symbol, two decimal places, empty-cart text) lives in one place.

use cartkeeper_core::types::price::{format_amount, format_decimal};
use cartkeeper_core::{Cart, CartLine, CurrencyCode};

use super::observer::CartObserver;

/// Text shown in place of line items when the cart is empty.
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty.";

/// Stable identifiers of the elements a cart renderer updates.
pub mod element_ids {
    /// Badge showing the total item count.
    pub const ITEM_COUNT: &str = "cart-item-count";

    /// Container holding one row per cart line.
    pub const ITEMS_CONTAINER: &str = "cart-items-container";

    /// Element showing the cart total.
    pub const TOTAL: &str = "cart-total";
}

/// Cart line display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    /// Formatted unit price, e.g. `$5.00`.
    pub price: String,
    /// Formatted `price * quantity`.
    pub line_price: String,
    pub image: Option<String>,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    /// Formatted total without a currency symbol, e.g. `13.00`.
    pub total: String,
    /// Formatted total with a currency symbol, e.g. `$13.00`.
    pub subtotal: String,
    pub item_count: u64,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty(currency: CurrencyCode) -> Self {
        Self {
            items: Vec::new(),
            total: "0.00".to_string(),
            subtotal: format!("{}0.00", currency.symbol()),
            item_count: 0,
        }
    }

    /// Build a view of `cart`.
    #[must_use]
    pub fn from_cart(cart: &Cart, currency: CurrencyCode) -> Self {
        if cart.is_empty() {
            return Self::empty(currency);
        }

        let total = cart.total_price();
        Self {
            items: cart
                .iter()
                .map(|line| CartItemView::from_line(line, currency))
                .collect(),
            total: format_decimal(total),
            subtotal: format_amount(total, currency),
            item_count: cart.total_items(),
        }
    }

    /// Whether there are no items to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl CartItemView {
    fn from_line(line: &CartLine, currency: CurrencyCode) -> Self {
        Self {
            id: line.id().to_string(),
            name: line.name().to_owned(),
            quantity: line.quantity(),
            price: line.price().display(currency),
            line_price: format_amount(line.line_total(), currency),
            image: line.image().map(str::to_owned),
        }
    }
}

/// Observer that keeps the latest [`CartView`].
///
/// Share it with `Rc<RefCell<_>>` and forward from a subscribed closure to
/// read the view after mutations.
#[derive(Debug, Clone)]
pub struct CartDisplay {
    currency: CurrencyCode,
    view: CartView,
    renders: usize,
}

impl CartDisplay {
    /// Create a display that has not rendered yet.
    #[must_use]
    pub fn new(currency: CurrencyCode) -> Self {
        Self {
            currency,
            view: CartView::empty(currency),
            renders: 0,
        }
    }

    /// The most recently rendered view.
    #[must_use]
    pub const fn view(&self) -> &CartView {
        &self.view
    }

    /// Text for the item count badge.
    #[must_use]
    pub fn badge(&self) -> String {
        self.view.item_count.to_string()
    }

    /// How many times the display has been refreshed.
    #[must_use]
    pub const fn renders(&self) -> usize {
        self.renders
    }
}

impl CartObserver for CartDisplay {
    fn cart_changed(&mut self, cart: &Cart) {
        self.view = CartView::from_cart(cart, self.currency);
        self.renders += 1;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cartkeeper_core::{Price, Product};

    use super::*;

    fn cart() -> Cart {
        let mut cart = Cart::new();
        let tee = Product::new("a", "Tee", Price::parse("5").unwrap(), Some("/tee.jpg")).unwrap();
        let mug = Product::new("b", "Mug", Price::parse("3").unwrap(), None).unwrap();
        cart.add(&tee);
        cart.add(&tee);
        cart.add(&mug);
        cart
    }

    #[test]
    fn test_empty_view() {
        let view = CartView::from_cart(&Cart::new(), CurrencyCode::USD);
        assert!(view.is_empty());
        assert_eq!(view.total, "0.00");
        assert_eq!(view.subtotal, "$0.00");
        assert_eq!(view.item_count, 0);
    }

    #[test]
    fn test_view_formats_prices() {
        let view = CartView::from_cart(&cart(), CurrencyCode::USD);

        assert_eq!(view.item_count, 3);
        assert_eq!(view.total, "13.00");
        assert_eq!(view.subtotal, "$13.00");

        let tee = view.items.first().unwrap();
        assert_eq!(tee.name, "Tee");
        assert_eq!(tee.quantity, 2);
        assert_eq!(tee.price, "$5.00");
        assert_eq!(tee.line_price, "$10.00");
        assert_eq!(tee.image.as_deref(), Some("/tee.jpg"));

        let mug = view.items.get(1).unwrap();
        assert_eq!(mug.image, None);
    }

    #[test]
    fn test_view_rounds_half_cents_up() {
        let mut cart = Cart::new();
        cart.add(&Product::new("c", "Sticker", Price::parse("0.125").unwrap(), None).unwrap());
        let view = CartView::from_cart(&cart, CurrencyCode::USD);

        assert_eq!(view.total, "0.13");
        assert_eq!(view.subtotal, "$0.13");
        assert_eq!(view.items.first().unwrap().line_price, "$0.13");
    }

    #[test]
    fn test_view_currency_symbol() {
        let view = CartView::from_cart(&cart(), CurrencyCode::GBP);
        assert_eq!(view.subtotal, "£13.00");
    }

    #[test]
    fn test_display_tracks_changes() {
        let mut display = CartDisplay::new(CurrencyCode::USD);
        assert_eq!(display.renders(), 0);

        display.cart_changed(&cart());
        assert_eq!(display.badge(), "3");
        assert_eq!(display.renders(), 1);

        display.cart_changed(&Cart::new());
        assert_eq!(display.badge(), "0");
        assert!(display.view().is_empty());
    }
}
