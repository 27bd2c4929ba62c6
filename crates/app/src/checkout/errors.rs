//! Checkout errors.

use domicilios::checkout::PaymentSessionError;
use thiserror::Error;

use crate::{checkout::Redirect, gateway::GatewayError};

/// Checkout cannot start.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PreconditionError {
    /// No signed-in user.
    #[error("sign in to check out")]
    NotAuthenticated,

    /// Nothing to pay for.
    #[error("cart is empty")]
    EmptyCart,
}

/// The provider did not take the payment.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PaymentError {
    /// The card was declined; carries the provider's message.
    #[error("card error: {0}")]
    Card(String),

    /// The payment details were rejected; carries the provider's message.
    #[error("validation error: {0}")]
    Validation(String),

    /// Anything else.
    #[error("unexpected payment error")]
    Unexpected,
}

impl PaymentError {
    /// Message to show the shopper.
    pub fn user_message(&self) -> &str {
        match self {
            PaymentError::Card(message) | PaymentError::Validation(message) => message,
            PaymentError::Unexpected => UNEXPECTED_PAYMENT_MESSAGE,
        }
    }
}

pub(crate) const UNEXPECTED_PAYMENT_MESSAGE: &str =
    "An error occurred while processing the payment.";

/// Errors that can end a checkout attempt.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout was not allowed to start.
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    /// The payment intent could not be created.
    #[error("could not start the payment process")]
    Gateway(#[source] GatewayError),

    /// The cart changed after the payment intent was created.
    #[error("cart changed since the payment was prepared")]
    StaleCart,

    /// The provider refused the payment.
    #[error(transparent)]
    Payment(#[from] PaymentError),

    /// The payment session was driven out of order.
    #[error(transparent)]
    Session(#[from] PaymentSessionError),
}

impl CheckoutError {
    /// Where to send the shopper, if the checkout page should be left.
    pub fn redirect(&self) -> Option<Redirect> {
        match self {
            CheckoutError::Precondition(PreconditionError::NotAuthenticated) => {
                Some(Redirect::Login)
            }
            CheckoutError::Precondition(PreconditionError::EmptyCart)
            | CheckoutError::Gateway(_) => Some(Redirect::Catalog),
            CheckoutError::StaleCart => Some(Redirect::Checkout),
            CheckoutError::Payment(_) | CheckoutError::Session(_) => None,
        }
    }
}
