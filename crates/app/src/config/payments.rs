//! Payments Config

use clap::Args;
use domicilios::prices::Price;
use rusty_money::iso::{self, Currency};

use crate::{
    checkout::{CartClearPolicy, CheckoutSettings},
    config::ConfigError,
    payments::StripeConfig,
};

/// Payment provider and checkout settings.
#[derive(Debug, Args)]
pub struct PaymentsConfig {
    /// Payment provider API base URL
    #[arg(long, env = "PAYMENTS_API_URL", default_value = "https://api.stripe.com")]
    pub payments_api_url: String,

    /// Payment provider publishable key
    #[arg(long, env = "PAYMENTS_PUBLISHABLE_KEY", hide_env_values = true)]
    pub payments_publishable_key: String,

    /// Public origin of the storefront, used for the payment return URL
    #[arg(long, env = "APP_ORIGIN", default_value = "http://localhost:5173")]
    pub app_origin: String,

    /// Flat shipping fee in minor units
    #[arg(long, env = "SHIPPING_FEE", default_value_t = 5_000)]
    pub shipping_fee: u64,

    /// Empty the cart after a failed payment as well as a successful one
    #[arg(
        long,
        env = "CLEAR_CART_ON_FAILURE",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub clear_cart_on_failure: bool,

    /// ISO 4217 currency code used when displaying amounts
    #[arg(long, env = "CURRENCY", default_value = "COP")]
    pub currency: String,
}

impl PaymentsConfig {
    /// Client configuration for the payment provider.
    pub fn stripe(&self) -> StripeConfig {
        StripeConfig {
            api_url: self.payments_api_url.clone(),
            publishable_key: self.payments_publishable_key.clone(),
        }
    }

    /// Display currency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownCurrency`] for an unrecognised code.
    pub fn currency(&self) -> Result<&'static Currency, ConfigError> {
        iso::find(&self.currency.to_uppercase())
            .ok_or_else(|| ConfigError::UnknownCurrency(self.currency.clone()))
    }

    /// Checkout behaviour.
    pub fn checkout(&self) -> CheckoutSettings {
        CheckoutSettings {
            origin: self.app_origin.clone(),
            shipping_fee: Price::new(self.shipping_fee),
            clear_policy: CartClearPolicy::from_clear_on_failure(self.clear_cart_on_failure),
        }
    }
}
