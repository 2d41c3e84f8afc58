//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! ck-cli cart add --id tee --name "Pineapple Tee" --price 19.99
//! ck-cli cart remove tee
//! ck-cli cart show
//! ck-cli cart clear
//! ck-cli cart submit
//! ```
//!
//! Each invocation opens the store, runs one command and prints the refreshed
//! cart summary reported by a subscribed [`CartDisplay`].

#![allow(clippy::print_stdout)]

use std::cell::RefCell;
use std::rc::Rc;

use cartkeeper_core::Cart;
use cartkeeper_core::types::price::format_amount;
use cartkeeper_storefront::cart::{CartDisplay, CartObserver, CartView, EMPTY_CART_MESSAGE};
use cartkeeper_storefront::{
    CartCommand, CartError, CartStore, CommandOutcome, JsonFileStorage, RawProduct,
    StorefrontConfig,
};

/// Open the cart store with a display subscribed to it.
fn open(config: &StorefrontConfig) -> (CartStore<JsonFileStorage>, Rc<RefCell<CartDisplay>>) {
    let storage = JsonFileStorage::new(&config.data_file);
    let mut store = CartStore::with_key(storage, config.cart_key.clone());

    let display = Rc::new(RefCell::new(CartDisplay::new(config.currency)));
    let handle = Rc::clone(&display);
    store.subscribe(move |cart: &Cart| handle.borrow_mut().cart_changed(cart));

    (store, display)
}

const fn items_noun(count: u64) -> &'static str {
    if count == 1 { "item" } else { "items" }
}

/// Print the one-line summary: item count and total.
fn print_summary(view: &CartView) {
    let noun = items_noun(view.item_count);
    println!("{} {noun} in cart, total {}", view.item_count, view.subtotal);
}

/// Add one unit of a product.
///
/// # Errors
///
/// Returns an error if the product data is invalid or the store cannot be
/// written.
pub fn add(
    config: &StorefrontConfig,
    id: String,
    name: String,
    price: String,
    image: Option<String>,
) -> Result<(), CartError> {
    let (mut store, display) = open(config);
    let raw = RawProduct {
        id: Some(id),
        name: Some(name),
        price: Some(price),
        image,
    };

    if let CommandOutcome::Added { id, quantity } = store.dispatch(CartCommand::Add(raw))? {
        println!("Added {id} (quantity {quantity})");
    }
    print_summary(display.borrow().view());
    Ok(())
}

/// Remove a product's line.
///
/// # Errors
///
/// Returns an error if the store cannot be written.
pub fn remove(config: &StorefrontConfig, id: String) -> Result<(), CartError> {
    let (mut store, display) = open(config);

    match store.dispatch(CartCommand::Remove(id))? {
        CommandOutcome::Removed { id, removed: true } => println!("Removed {id}"),
        CommandOutcome::Removed { id, removed: false } => println!("{id} is not in the cart"),
        _ => println!("Nothing to remove"),
    }
    print_summary(display.borrow().view());
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the store cannot be written.
pub fn clear(config: &StorefrontConfig) -> Result<(), CartError> {
    let (mut store, display) = open(config);

    store.dispatch(CartCommand::Clear)?;
    println!("Cart cleared");
    print_summary(display.borrow().view());
    Ok(())
}

/// Print every line and the total.
pub fn show(config: &StorefrontConfig) {
    let (mut store, display) = open(config);
    store.refresh();

    let display = display.borrow();
    let view = display.view();
    if view.is_empty() {
        println!("{EMPTY_CART_MESSAGE}");
    }
    for item in &view.items {
        println!(
            "{:<16} {:<24} x{:<4} {:>10} {:>10}",
            item.id, item.name, item.quantity, item.price, item.line_price
        );
    }
    println!("Total: {}", view.total);
}

/// Submit the cart as an order.
///
/// # Errors
///
/// Returns an error if the cart cannot be cleared.
pub fn submit(config: &StorefrontConfig) -> Result<(), CartError> {
    let (mut store, display) = open(config);

    if let CommandOutcome::OrderSubmitted(confirmation) = store.dispatch(CartCommand::SubmitOrder)? {
        println!("{}", confirmation.message());
        println!(
            "Order {} ({} {}, {})",
            confirmation.reference,
            confirmation.item_count,
            items_noun(confirmation.item_count),
            format_amount(confirmation.total, config.currency)
        );
    }
    print_summary(display.borrow().view());
    Ok(())
}
