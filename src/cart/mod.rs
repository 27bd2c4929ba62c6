//! Cart
//!
//! [`Cart`] is the plain value: insertion-ordered lines keyed by product id,
//! with aggregates computed on every read. [`CartStore`] is the session-owned
//! handle that mutates it, notifies subscribers and writes it through to a
//! [`CartStorage`] slot.

use serde::Serialize;

use crate::{
    prices::Price,
    products::{Product, ProductId},
};

mod line;
pub mod storage;
mod store;

pub use line::CartLine;
pub use storage::{CartStorage, FileCartStorage, MemoryCartStorage, StorageError};
pub use store::CartStore;

/// The items a shopper intends to buy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cart {
    items: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines in the order their products were first added.
    pub fn lines(&self) -> &[CartLine] {
        &self.items
    }

    /// Line for `product_id`, if present.
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.items.iter().find(|line| line.product_id == product_id)
    }

    /// Whether the cart holds no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities over all lines; 0 when empty.
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .fold(0, u64::saturating_add)
    }

    /// Sum of unit price times quantity over all lines; 0 when empty.
    pub fn subtotal(&self) -> Price {
        self.items
            .iter()
            .map(CartLine::line_total)
            .fold(Price::ZERO, Price::plus)
    }

    /// Add one unit of `product`. Existing lines keep their cached details.
    ///
    /// Returns `true` when the cart changed.
    pub(crate) fn add(&mut self, product: &Product) -> bool {
        match self.line_mut(product.id) {
            Some(line) => line.increment(),
            None => {
                self.items.push(CartLine::from_product(product));

                true
            }
        }
    }

    /// Returns `true` when the quantity actually changed.
    pub(crate) fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> bool {
        self.line_mut(product_id)
            .is_some_and(|line| line.set_quantity(quantity))
    }

    /// Returns `true` when a line was removed.
    pub(crate) fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.items.len();

        self.items.retain(|line| line.product_id != product_id);

        self.items.len() != before
    }

    /// Returns `true` when there was anything to clear.
    pub(crate) fn clear(&mut self) -> bool {
        let had_items = !self.items.is_empty();

        self.items.clear();

        had_items
    }

    /// Rebuild a cart from persisted lines, folding duplicate ids together so
    /// the unique-key invariant holds even for hand-edited payloads.
    pub(crate) fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Cart::new();

        for line in lines {
            match cart.line_mut(line.product_id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity.get());
                }
                None => cart.items.push(line),
            }
        }

        cart
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.items
            .iter_mut()
            .find(|line| line.product_id == product_id)
    }
}

#[cfg(test)]
mod tests {
    use crate::stores::StoreId;

    use super::*;

    fn product(name: &str, price: u64) -> Product {
        Product::new(ProductId::new(), name, Price::new(price), StoreId::new())
    }

    #[test]
    fn empty_cart_aggregates_are_zero() {
        let cart = Cart::new();

        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.subtotal(), Price::ZERO);
    }

    #[test]
    fn adding_same_product_twice_increments_one_line() {
        let mut cart = Cart::new();
        let arepa = product("Arepa", 4_000);

        cart.add(&arepa);
        cart.add(&arepa);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.line(arepa.id).map(|line| line.quantity.get()), Some(2));
    }

    #[test]
    fn re_adding_keeps_the_price_captured_first() {
        let mut cart = Cart::new();
        let mut arepa = product("Arepa", 4_000);

        cart.add(&arepa);

        arepa.price = Price::new(9_000);
        arepa.name = "Arepa grande".to_string();
        cart.add(&arepa);

        let line = cart.line(arepa.id);

        assert_eq!(line.map(|line| line.unit_price), Some(Price::new(4_000)));
        assert_eq!(line.map(|line| line.name.as_str()), Some("Arepa"));
        assert_eq!(cart.subtotal(), Price::new(8_000));
    }

    #[test]
    fn lines_keep_insertion_order() {
        let mut cart = Cart::new();
        let first = product("Primero", 1);
        let second = product("Segundo", 2);

        cart.add(&first);
        cart.add(&second);
        cart.add(&first);

        let ids: Vec<_> = cart.lines().iter().map(|line| line.product_id).collect();

        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[test]
    fn update_quantity_on_missing_line_is_a_no_op() {
        let mut cart = Cart::new();
        cart.add(&product("Arepa", 4_000));

        let before = cart.clone();

        assert!(!cart.update_quantity(ProductId::new(), 5));
        assert_eq!(cart, before);
    }

    #[test]
    fn remove_missing_line_is_a_no_op() {
        let mut cart = Cart::new();
        cart.add(&product("Arepa", 4_000));

        assert!(!cart.remove(ProductId::new()));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn from_lines_folds_duplicate_ids() {
        let arepa = product("Arepa", 4_000);
        let line = CartLine::from_product(&arepa);

        let cart = Cart::from_lines([line.clone(), line]);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 2);
    }
}
