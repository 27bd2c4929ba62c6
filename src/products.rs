//! Products

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ids::TypedUuid, prices::Price, stores::StoreId};

/// Product Id
pub type ProductId = TypedUuid<Product>;

/// Product as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Product category
    #[serde(default)]
    pub category: Option<String>,

    /// List price
    pub price: Price,

    /// Discount percentage, 0 to 100
    #[serde(default)]
    pub discount: Decimal,

    /// Units in stock
    #[serde(default)]
    pub stock: u32,

    /// Product description
    #[serde(default)]
    pub description: Option<String>,

    /// Product image
    #[serde(default)]
    pub image_url: Option<String>,

    /// Owning store
    pub store_id: StoreId,

    /// Embedded store summary, present when the listing joins on stores
    #[serde(default, rename = "stores", skip_serializing_if = "Option::is_none")]
    pub store: Option<ProductStore>,
}

/// Store fields embedded in a product listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductStore {
    /// Store name
    pub name: String,
}

impl Product {
    /// Create a product with the required fields; everything else is empty.
    pub fn new(id: ProductId, name: impl Into<String>, price: Price, store_id: StoreId) -> Self {
        Self {
            id,
            name: name.into(),
            category: None,
            price,
            discount: Decimal::ZERO,
            stock: 0,
            description: None,
            image_url: None,
            store_id,
            store: None,
        }
    }

    /// Set the image.
    #[must_use]
    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Set the discount percentage.
    #[must_use]
    pub fn with_discount(mut self, discount: Decimal) -> Self {
        self.discount = discount;
        self
    }

    /// Price after the product's discount. Only used for display; carts
    /// capture the list price.
    pub fn discounted_price(&self) -> Price {
        self.price.discounted(self.discount)
    }

    /// Whether a discount applies.
    pub fn has_discount(&self) -> bool {
        self.discount > Decimal::ZERO
    }

    /// Name of the store, if the listing embedded it.
    pub fn store_name(&self) -> Option<&str> {
        self.store.as_ref().map(|store| store.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn deserializes_a_joined_catalog_row() -> TestResult {
        let json = r#"{
            "id": "0190f0c4-7b6a-7cc1-9a8e-3f1d2b4c5d6e",
            "name": "Arepa de chócolo",
            "category": "comida",
            "price": 8000,
            "discount": 10,
            "stock": 12,
            "description": "Con queso",
            "image_url": null,
            "store_id": "0190f0c4-7b6a-7cc1-9a8e-3f1d2b4c5d6f",
            "stores": { "name": "La Esquina" }
        }"#;

        let product: Product = serde_json::from_str(json)?;

        assert_eq!(product.price, Price::new(8_000));
        assert_eq!(product.discounted_price(), Price::new(7_200));
        assert_eq!(product.store_name(), Some("La Esquina"));
        assert!(product.has_discount());
        assert!(product.image_url.is_none());

        Ok(())
    }

    #[test]
    fn missing_optional_columns_default() -> TestResult {
        let json = r#"{
            "id": "0190f0c4-7b6a-7cc1-9a8e-3f1d2b4c5d6e",
            "name": "Café",
            "price": 3000,
            "store_id": "0190f0c4-7b6a-7cc1-9a8e-3f1d2b4c5d6f"
        }"#;

        let product: Product = serde_json::from_str(json)?;

        assert_eq!(product.discount, Decimal::ZERO);
        assert_eq!(product.stock, 0);
        assert!(!product.has_discount());
        assert_eq!(product.discounted_price(), product.price);

        Ok(())
    }

    #[test]
    fn numeric_price_columns_deserialize() -> TestResult {
        let json = r#"[
            {
                "id": "0190f0c4-7b6a-7cc1-9a8e-3f1d2b4c5d6e",
                "name": "Café",
                "price": 3000,
                "store_id": "0190f0c4-7b6a-7cc1-9a8e-3f1d2b4c5d6f"
            },
            {
                "id": "0190f0c4-7b6a-7cc1-9a8e-3f1d2b4c5d70",
                "name": "Pandebono",
                "price": 4500.00,
                "store_id": "0190f0c4-7b6a-7cc1-9a8e-3f1d2b4c5d6f"
            }
        ]"#;

        let products: Vec<Product> = serde_json::from_str(json)?;

        assert_eq!(products.len(), 2);
        assert_eq!(products[1].price, Price::new(4_500));

        Ok(())
    }
}
