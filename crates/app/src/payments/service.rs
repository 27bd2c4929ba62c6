//! Payment provider service.

use async_trait::async_trait;
use domicilios::checkout::ClientSecret;
use mockall::automock;

use crate::payments::{
    PaymentProviderError,
    models::{PaymentConfirmation, PaymentMethod},
};

/// Confirms payments and reports the provider's authoritative outcome.
#[automock]
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Confirm the intent behind `client_secret` with `payment_method`.
    ///
    /// Provider refusals are returned as [`PaymentConfirmation::Failed`];
    /// only transport and protocol problems are errors.
    async fn confirm_payment(
        &self,
        client_secret: &ClientSecret,
        payment_method: &PaymentMethod,
        return_url: &str,
    ) -> Result<PaymentConfirmation, PaymentProviderError>;
}
