//! Catalog models.

use domicilios::{prices::Price, products::Product, stores::StoreId};
use rust_decimal::Decimal;

use crate::{catalog::CatalogError, gateway::NewProductRow};

/// Title of the unfiltered product listing.
pub const ALL_PRODUCTS_TITLE: &str = "All products";

/// Products shown on one listing page.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductsPage {
    /// Store name when filtered by a known store
    pub title: String,

    /// Products in listing order
    pub products: Vec<Product>,
}

impl ProductsPage {
    /// A page with nothing to show.
    pub fn empty(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            products: Vec::new(),
        }
    }

    /// Whether the empty state should be shown.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// A product as entered by a store owner, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    /// Product name
    pub name: Option<String>,

    /// Product category
    pub category: Option<String>,

    /// List price
    pub price: Option<Price>,

    /// Discount percentage; zero when omitted
    pub discount: Option<Decimal>,

    /// Units in stock
    pub stock: Option<u32>,

    /// Description
    pub description: Option<String>,

    /// Image
    pub image_url: Option<String>,
}

impl ProductDraft {
    /// Check required fields and build the row to insert for `store_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MissingField`] for the first empty required
    /// field, or [`CatalogError::InvalidDiscount`] when the discount is out
    /// of range.
    pub fn into_row(self, store_id: StoreId) -> Result<NewProductRow, CatalogError> {
        let name = required_text(self.name, "name")?;
        let category = required_text(self.category, "category")?;
        let price = self.price.ok_or(CatalogError::MissingField("price"))?;
        let stock = self.stock.ok_or(CatalogError::MissingField("stock"))?;
        let description = required_text(self.description, "description")?;

        let discount = self.discount.unwrap_or_default();

        if discount < Decimal::ZERO || discount > Decimal::ONE_HUNDRED {
            return Err(CatalogError::InvalidDiscount(discount));
        }

        Ok(NewProductRow {
            name,
            category,
            price,
            discount,
            stock,
            description,
            image_url: self.image_url.filter(|url| !url.trim().is_empty()),
            store_id,
        })
    }
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String, CatalogError> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or(CatalogError::MissingField(field))
}
