//! Payments

pub mod errors;
pub mod models;
pub mod service;
mod stripe;

pub use errors::PaymentProviderError;
pub use models::{
    PaymentConfirmation, PaymentMethod, ProviderErrorKind, ProviderFailure,
};
pub use service::*;
pub use stripe::{StripeClient, StripeConfig};
