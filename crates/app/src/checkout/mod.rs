//! Checkout
//!
//! Drives one payment attempt for the shopper's cart: guard preconditions,
//! mint a payment intent through the gateway, confirm with the provider and
//! settle the cart.

pub mod errors;
pub mod models;
mod orchestrator;

pub use errors::{CheckoutError, PaymentError, PreconditionError};
pub use models::{
    Appearance, CartClearPolicy, CheckoutSettings, PaymentElementOptions, Redirect,
};
pub use orchestrator::{CheckoutOrchestrator, CheckoutOutcome, ReadyCheckout};
