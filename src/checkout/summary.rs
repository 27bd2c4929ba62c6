//! Order Summary

use crate::{
    cart::{Cart, CartLine},
    prices::Price,
};

/// Flat delivery fee charged on every order, in minor units.
pub const DEFAULT_SHIPPING_FEE: Price = Price::new(5_000);

/// What the shopper is about to pay for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    lines: Vec<CartLine>,
    subtotal: Price,
    shipping: Price,
}

impl OrderSummary {
    /// Summarise `cart` with a flat `shipping` fee.
    pub fn new(cart: &Cart, shipping: Price) -> Self {
        Self {
            lines: cart.lines().to_vec(),
            subtotal: cart.subtotal(),
            shipping,
        }
    }

    /// Lines being paid for.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> Price {
        self.subtotal
    }

    /// Delivery fee.
    pub fn shipping(&self) -> Price {
        self.shipping
    }

    /// Subtotal plus delivery.
    pub fn total(&self) -> Price {
        self.subtotal.plus(self.shipping)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        products::{Product, ProductId},
        stores::StoreId,
    };

    use super::*;

    #[test]
    fn total_adds_shipping_to_subtotal() {
        let mut cart = Cart::new();
        let tamal = Product::new(ProductId::new(), "Tamal", Price::new(12_000), StoreId::new());

        cart.add(&tamal);
        cart.add(&tamal);

        let summary = OrderSummary::new(&cart, DEFAULT_SHIPPING_FEE);

        assert_eq!(summary.lines().len(), 1);
        assert_eq!(summary.subtotal(), Price::new(24_000));
        assert_eq!(summary.total(), Price::new(29_000));
    }
}
