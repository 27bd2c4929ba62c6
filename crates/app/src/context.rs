//! App Context

use std::{fmt, sync::Arc};

use domicilios::cart::{CartStore, FileCartStorage};
use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::CatalogService,
    checkout::CheckoutOrchestrator,
    config::{AppConfig, ConfigError},
    gateway::{AuthGateway, GatewayClient},
    notifications::CollectingNotifier,
    payments::StripeClient,
};

/// Errors building the application context.
#[derive(Debug, Error)]
pub enum AppInitError {
    /// A setting was present but unusable.
    #[error("invalid configuration")]
    Config(#[from] ConfigError),
}

/// Every service a command needs, wired from configuration.
#[derive(Clone)]
pub struct AppContext {
    /// The shopper's persisted cart.
    pub cart: CartStore,

    /// Store and product listings.
    pub catalog: CatalogService,

    /// Password sign-in.
    pub auth: Arc<dyn AuthGateway>,

    /// Checkout flow over `cart`.
    pub checkout: CheckoutOrchestrator,

    /// Notifications raised by the services, drained by the caller.
    pub notifications: CollectingNotifier,

    /// Display currency for amounts.
    pub currency: &'static Currency,
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("cart", &self.cart)
            .field("checkout", &self.checkout)
            .field("currency", &self.currency.iso_alpha_code)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when a setting cannot be interpreted.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let currency = config.payments.currency()?;

        let gateway = Arc::new(GatewayClient::new(config.backend.gateway()));
        let provider = Arc::new(StripeClient::new(config.payments.stripe()));
        let notifications = CollectingNotifier::new();
        let notifier = Arc::new(notifications.clone());

        let storage = FileCartStorage::new(&config.storage.cart_storage_dir);

        debug!(dir = %storage.dir().display(), "opening cart storage");

        let cart = CartStore::open(Arc::new(storage));

        Ok(Self {
            catalog: CatalogService::new(gateway.clone(), notifier.clone()),
            auth: gateway.clone(),
            checkout: CheckoutOrchestrator::new(
                gateway,
                provider,
                notifier,
                cart.clone(),
                config.payments.checkout(),
            ),
            cart,
            notifications,
            currency,
        })
    }
}
