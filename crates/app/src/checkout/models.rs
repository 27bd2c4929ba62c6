//! Checkout models.

use domicilios::{
    checkout::{ClientSecret, DEFAULT_SHIPPING_FEE},
    prices::Price,
};
use serde::Serialize;

const LOGIN_PATH: &str = "/cliente/login";
const CATALOG_PATH: &str = "/productos";
const CHECKOUT_PATH: &str = "/checkout";
const DASHBOARD_PATH: &str = "/cliente/dashboard";

/// Where the shopper should be sent next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redirect {
    /// Sign-in page.
    Login,

    /// Product listing.
    Catalog,

    /// Checkout page, to start a fresh attempt.
    Checkout,

    /// Customer dashboard, where the provider returns after payment.
    Dashboard,

    /// A provider-hosted page (e.g. card authentication).
    External(String),
}

impl Redirect {
    /// Path or absolute URL of the destination.
    pub fn location(&self) -> &str {
        match self {
            Redirect::Login => LOGIN_PATH,
            Redirect::Catalog => CATALOG_PATH,
            Redirect::Checkout => CHECKOUT_PATH,
            Redirect::Dashboard => DASHBOARD_PATH,
            Redirect::External(url) => url,
        }
    }
}

/// When a finished payment attempt empties the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CartClearPolicy {
    /// Clear after success and after every failure.
    #[default]
    Always,

    /// Clear only after success, so a declined shopper can retry.
    OnSuccess,
}

impl CartClearPolicy {
    /// Pick the policy from the "clear on failure" switch.
    pub fn from_clear_on_failure(clear_on_failure: bool) -> Self {
        if clear_on_failure {
            Self::Always
        } else {
            Self::OnSuccess
        }
    }

    /// Whether to clear after an attempt that did or did not succeed.
    pub fn clears(self, succeeded: bool) -> bool {
        succeeded || self == Self::Always
    }
}

/// Checkout behaviour that varies by deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSettings {
    /// Public origin of the storefront, e.g. `"https://domicilios.example"`
    pub origin: String,

    /// Flat shipping fee added to every order
    pub shipping_fee: Price,

    /// Cart handling after a terminal payment outcome
    pub clear_policy: CartClearPolicy,
}

impl CheckoutSettings {
    /// Settings for `origin` with the default fee and policy.
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            shipping_fee: DEFAULT_SHIPPING_FEE,
            clear_policy: CartClearPolicy::default(),
        }
    }

    /// Where the provider sends the shopper after an off-page step.
    pub fn return_url(&self) -> String {
        format!("{}{DASHBOARD_PATH}", self.origin.trim_end_matches('/'))
    }
}

/// Visual theme for the embedded payment form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Appearance {
    /// Theme name
    pub theme: String,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            theme: "stripe".to_string(),
        }
    }
}

/// What the payment form needs to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentElementOptions {
    /// Secret of the intent being paid
    pub client_secret: ClientSecret,

    /// Form appearance
    pub appearance: Appearance,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn return_url_points_at_the_dashboard() {
        let settings = CheckoutSettings::new("https://domicilios.example/");

        assert_eq!(
            settings.return_url(),
            "https://domicilios.example/cliente/dashboard"
        );
    }

    #[test]
    fn on_success_policy_keeps_the_cart_after_failures() {
        assert!(CartClearPolicy::Always.clears(false));
        assert!(CartClearPolicy::OnSuccess.clears(true));
        assert!(!CartClearPolicy::OnSuccess.clears(false));
    }

    #[test]
    fn redirect_locations() {
        assert_eq!(Redirect::Login.location(), "/cliente/login");
        assert_eq!(Redirect::Catalog.location(), "/productos");
        assert_eq!(
            Redirect::External("https://hooks.example/3ds".to_string()).location(),
            "https://hooks.example/3ds"
        );
    }
}
