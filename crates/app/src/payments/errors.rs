//! Payment provider errors.

use thiserror::Error;

/// Errors reaching the payment provider.
///
/// A declined card is not an error here; it is reported as a failed
/// [`PaymentConfirmation`](crate::payments::PaymentConfirmation).
#[derive(Debug, Error)]
pub enum PaymentProviderError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The client secret does not name a payment intent.
    #[error("client secret does not identify a payment intent")]
    InvalidClientSecret,

    /// The provider answered with a body we could not interpret.
    #[error("unexpected response from payment provider: {0}")]
    UnexpectedResponse(String),
}
