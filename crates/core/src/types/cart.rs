//! Cart lines and the cart snapshot.
//!
//! A [`Cart`] is an ordered list of [`CartLine`]s keyed by product ID. The
//! persisted form is a bare JSON array:
//!
//! ```json
//! [
//!   {"id": "a", "name": "Tee", "price": 5, "image": "", "quantity": 2},
//!   {"id": "b", "name": "Mug", "price": 3, "image": "/img/mug.jpg", "quantity": 1}
//! ]
//! ```

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;
use super::product::Product;

/// Ways a deserialized cart can violate its invariants.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartInvariantError {
    /// Two lines share the same product ID.
    #[error("duplicate cart line for product {0}")]
    DuplicateId(ProductId),
    /// A line has a quantity of zero.
    #[error("cart line for product {0} has zero quantity")]
    ZeroQuantity(ProductId),
    /// A line has an empty name.
    #[error("cart line for product {0} has no name")]
    EmptyName(ProductId),
}

/// One product entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    id: ProductId,
    name: String,
    price: Price,
    #[serde(default)]
    image: String,
    quantity: u32,
}

impl CartLine {
    /// Start a new line for `product` with a quantity of one.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id().clone(),
            name: product.name().to_owned(),
            price: product.price(),
            image: product.image().unwrap_or_default().to_owned(),
            quantity: 1,
        }
    }

    /// The product ID.
    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.id
    }

    /// The display name captured when the line was created.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The unit price captured when the line was created.
    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    /// The image URL, if one was supplied.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        if self.image.is_empty() {
            None
        } else {
            Some(&self.image)
        }
    }

    /// Number of units of this product.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// `price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.times(self.quantity)
    }

    fn increment(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }
}

/// An ordered cart snapshot.
///
/// Lines keep insertion order and no two lines share a product ID.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Iterate over lines in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, CartLine> {
        self.lines.iter()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Find the line for a product.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == *id)
    }

    /// Add one unit of `product`.
    ///
    /// If the product is already in the cart its quantity is incremented and
    /// the stored name, price and image are left as they were. Otherwise a new
    /// line with a quantity of one is appended. Returns the new quantity.
    pub fn add(&mut self, product: &Product) -> u32 {
        if let Some(line) = self.lines.iter_mut().find(|line| line.id == *product.id()) {
            line.increment();
            return line.quantity;
        }
        self.lines.push(CartLine::from_product(product));
        1
    }

    /// Remove the line for `id`. Returns whether a line was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.id != *id);
        self.lines.len() != before
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of `price * quantity` across all lines.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.lines
            .iter()
            .map(CartLine::line_total)
            .fold(Decimal::ZERO, |acc, total| {
                acc.checked_add(total).unwrap_or(Decimal::MAX)
            })
    }

    /// Build a cart from stored lines, dropping any that break its invariants.
    ///
    /// Lines with a zero quantity or an empty name are dropped, as is any
    /// line repeating an earlier product ID. The rest keep their order.
    /// Returns the cart and one error per dropped line.
    #[must_use]
    pub fn from_lines(
        lines: impl IntoIterator<Item = CartLine>,
    ) -> (Self, Vec<CartInvariantError>) {
        let mut cart = Self::new();
        let mut rejected = Vec::new();
        let mut seen = HashSet::new();
        for line in lines {
            if line.quantity == 0 {
                rejected.push(CartInvariantError::ZeroQuantity(line.id));
            } else if line.name.is_empty() {
                rejected.push(CartInvariantError::EmptyName(line.id));
            } else if !seen.insert(line.id.clone()) {
                rejected.push(CartInvariantError::DuplicateId(line.id));
            } else {
                cart.lines.push(line);
            }
        }
        (cart, rejected)
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartLine;
    type IntoIter = std::slice::Iter<'a, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: &str, price: &str) -> Product {
        Product::new(id, &format!("Product {id}"), Price::parse(price).unwrap(), None).unwrap()
    }

    #[test]
    fn test_add_same_id_increments() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(&product("a", "5")), 1);
        assert_eq!(cart.add(&product("a", "5")), 2);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("a").unwrap().quantity(), 2);
    }

    #[test]
    fn test_add_keeps_first_price() {
        let mut cart = Cart::new();
        cart.add(&product("a", "5"));
        cart.add(&product("a", "9"));

        assert_eq!(cart.get("a").unwrap().price(), Price::parse("5").unwrap());
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = Cart::new();
        cart.add(&product("b", "1"));
        cart.add(&product("a", "1"));
        cart.add(&product("b", "1"));

        let ids: Vec<&str> = cart.iter().map(|line| line.id().as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn test_remove() {
        let mut cart = Cart::new();
        cart.add(&product("a", "1"));

        assert!(cart.remove("a"));
        assert!(!cart.remove("a"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        cart.add(&product("a", "5"));
        cart.add(&product("a", "5"));
        cart.add(&product("b", "3"));

        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), Decimal::new(13, 0));
    }

    #[test]
    fn test_empty_totals() {
        let cart = Cart::new();
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), Decimal::ZERO);
    }

    #[test]
    fn test_deserialize_storage_layout() {
        let json = r#"[
            {"id":"a","name":"Tee","price":5,"image":"","quantity":2},
            {"id":"b","name":"Mug","price":3.5,"image":"/mug.jpg","quantity":3}
        ]"#;
        let cart: Cart = serde_json::from_str(json).unwrap();

        assert_eq!(cart.total_items(), 5);
        assert_eq!(cart.get("a").unwrap().image(), None);
        assert_eq!(cart.get("b").unwrap().image(), Some("/mug.jpg"));
    }

    #[test]
    fn test_deserialize_without_image() {
        let cart: Cart =
            serde_json::from_str(r#"[{"id":"a","name":"Tee","price":5,"quantity":1}]"#).unwrap();
        assert_eq!(cart.get("a").unwrap().image(), None);
    }

    #[test]
    fn test_serialize_writes_empty_image() {
        let mut cart = Cart::new();
        cart.add(&product("a", "5"));

        let json = serde_json::to_string(&cart).unwrap();
        assert_eq!(
            json,
            r#"[{"id":"a","name":"Product a","price":5,"image":"","quantity":1}]"#
        );
    }

    fn lines(json: &str) -> Vec<CartLine> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_from_lines_drops_duplicate_ids() {
        let (cart, rejected) = Cart::from_lines(lines(
            r#"[
                {"id":"a","name":"Tee","price":5,"image":"","quantity":2},
                {"id":"b","name":"Mug","price":3,"image":"","quantity":1},
                {"id":"a","name":"Tee","price":9,"image":"","quantity":1}
            ]"#,
        ));

        let ids: Vec<&str> = cart.iter().map(|line| line.id().as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(cart.get("a").unwrap().quantity(), 2);
        assert!(matches!(
            rejected.as_slice(),
            [CartInvariantError::DuplicateId(id)] if id == "a"
        ));
    }

    #[test]
    fn test_from_lines_drops_zero_quantity_and_empty_name() {
        let (cart, rejected) = Cart::from_lines(lines(
            r#"[
                {"id":"a","name":"Tee","price":5,"image":"","quantity":0},
                {"id":"b","name":"","price":5,"image":"","quantity":1},
                {"id":"c","name":"Cap","price":5,"image":"","quantity":1}
            ]"#,
        ));

        assert_eq!(cart.len(), 1);
        assert!(cart.get("c").is_some());
        assert!(matches!(
            rejected.as_slice(),
            [
                CartInvariantError::ZeroQuantity(_),
                CartInvariantError::EmptyName(_)
            ]
        ));
    }

    #[test]
    fn test_from_lines_keeps_blank_but_present_fields() {
        let (cart, rejected) = Cart::from_lines(lines(
            r#"[{"id":" ","name":" ","price":5,"image":"","quantity":1}]"#,
        ));

        assert!(rejected.is_empty());
        assert_eq!(cart.get(" ").unwrap().name(), " ");
    }
}
