//! Cart Lines

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::{
    prices::Price,
    products::{Product, ProductId},
};

/// One product in the cart.
///
/// Name, price and image are captured when the product is first added and
/// are not refreshed from the catalog afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product id, unique within a cart
    #[serde(rename = "id")]
    pub product_id: ProductId,

    /// Product name at add time
    pub name: String,

    /// Unit price at add time
    #[serde(rename = "price")]
    pub unit_price: Price,

    /// Product image at add time
    #[serde(default)]
    pub image_url: Option<String>,

    /// Units of this product
    pub quantity: NonZeroU32,
}

impl CartLine {
    /// A new line holding one unit of `product`.
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            image_url: product.image_url.clone(),
            quantity: NonZeroU32::MIN,
        }
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity.get())
    }

    /// Add one unit. Returns `false` when the quantity is already at `u32::MAX`.
    pub(crate) fn increment(&mut self) -> bool {
        let quantity = self.quantity.saturating_add(1);

        let changed = self.quantity != quantity;
        self.quantity = quantity;

        changed
    }

    /// Set the quantity, clamping anything below one up to one.
    pub(crate) fn set_quantity(&mut self, quantity: i64) -> bool {
        let clamped = u32::try_from(quantity.max(1)).unwrap_or(u32::MAX);
        let quantity = NonZeroU32::new(clamped).unwrap_or(NonZeroU32::MIN);

        let changed = self.quantity != quantity;
        self.quantity = quantity;

        changed
    }
}
