//! Catalog service.

use std::{fmt, sync::Arc};

use domicilios::{
    products::{Product, ProductId},
    stores::{Store, StoreId},
};
use tracing::{debug, warn};

use crate::{
    auth::Session,
    catalog::{ALL_PRODUCTS_TITLE, CatalogError, ProductDraft, ProductsPage},
    gateway::{CatalogGateway, GatewayError},
    notifications::{Notification, Notifier},
};

/// Store and product listings, plus product creation for store owners.
#[derive(Clone)]
pub struct CatalogService {
    gateway: Arc<dyn CatalogGateway>,
    notifier: Arc<dyn Notifier>,
}

impl fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogService").finish_non_exhaustive()
    }
}

impl CatalogService {
    /// Create a service over `gateway`, reporting problems to `notifier`.
    pub fn new(gateway: Arc<dyn CatalogGateway>, notifier: Arc<dyn Notifier>) -> Self {
        Self { gateway, notifier }
    }

    /// All stores.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    pub async fn stores(&self) -> Result<Vec<Store>, GatewayError> {
        self.gateway.list_stores().await
    }

    /// A single product, if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    pub async fn product(&self, product_id: ProductId) -> Result<Option<Product>, GatewayError> {
        self.gateway.get_product(product_id).await
    }

    /// Products for one store, or for every store when `store` is `None`.
    ///
    /// Never fails: an unknown store keeps the generic title, and a failed
    /// listing is reported to the notifier and shown as an empty page.
    pub async fn products_page(&self, store: Option<StoreId>) -> ProductsPage {
        let title = match store {
            Some(store_id) => self.store_title(store_id).await,
            None => ALL_PRODUCTS_TITLE.to_string(),
        };

        match self.gateway.list_products(store).await {
            Ok(products) => {
                debug!(count = products.len(), "loaded products");

                ProductsPage { title, products }
            }
            Err(error) => {
                warn!("failed to load products: {error}");

                self.notifier
                    .notify(Notification::info("Error", "Could not load products."));

                ProductsPage::empty(title)
            }
        }
    }

    /// Validate `draft` and add it to `store`'s catalog.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any backend call, or the backend's
    /// rejection. Both are also reported to the notifier.
    pub async fn add_product(
        &self,
        session: &Session,
        store: StoreId,
        draft: ProductDraft,
    ) -> Result<(), CatalogError> {
        let row = match draft.into_row(store) {
            Ok(row) => row,
            Err(error) => {
                self.notifier.notify(Notification::destructive(
                    "Validation error",
                    "Please fill in every required field.",
                ));

                return Err(error);
            }
        };

        if let Err(error) = self.gateway.create_product(session, row).await {
            warn!("failed to add product: {error}");

            let description = match &error {
                GatewayError::Rejected { message, .. } => message.clone(),
                other => other.to_string(),
            };

            self.notifier
                .notify(Notification::destructive("Could not add product", description));

            return Err(error.into());
        }

        self.notifier.notify(Notification::info(
            "Success",
            "Product added successfully.",
        ));

        Ok(())
    }

    async fn store_title(&self, store_id: StoreId) -> String {
        match self.gateway.get_store(store_id).await {
            Ok(Some(store)) => store.name,
            Ok(None) => ALL_PRODUCTS_TITLE.to_string(),
            Err(error) => {
                debug!("store lookup failed, using generic title: {error}");

                ALL_PRODUCTS_TITLE.to_string()
            }
        }
    }
}
