//! Payment Sessions

use std::fmt;

use thiserror::Error;

use crate::cart::Cart;

/// Lifecycle of one checkout attempt's payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    /// Nothing requested yet.
    Uninitialized,

    /// Intent requested, waiting for the client secret.
    Pending,

    /// Client secret received; the payment form can be shown.
    Ready,

    /// Confirmation sent to the provider.
    Submitting,

    /// Provider reported success.
    Succeeded,

    /// Provider reported an error.
    Failed,
}

impl PaymentStatus {
    /// Whether no further transitions are possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, PaymentStatus::Succeeded | PaymentStatus::Failed)
    }
}

/// Errors raised by invalid session use.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaymentSessionError {
    /// Sessions are only created from a non-empty cart.
    #[error("cannot start a payment session for an empty cart")]
    EmptyCart,

    /// The requested transition is not allowed from the current status.
    #[error("cannot move payment session from {from:?} to {to:?}")]
    InvalidTransition {
        /// Status before the attempted transition.
        from: PaymentStatus,

        /// Status the caller asked for.
        to: PaymentStatus,
    },
}

/// Opaque token identifying a payment intent to the provider.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientSecret(String);

impl ClientSecret {
    /// Wrap a secret issued by the provider.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// The raw secret.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientSecret(..)")
    }
}

/// Payment state for one checkout attempt, bound to the cart it was created
/// from.
#[derive(Debug, Clone)]
pub struct PaymentSession {
    snapshot: Cart,
    client_secret: Option<ClientSecret>,
    status: PaymentStatus,
}

impl PaymentSession {
    /// Start a session for `snapshot`.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentSessionError::EmptyCart`] when the snapshot has no lines.
    pub fn new(snapshot: Cart) -> Result<Self, PaymentSessionError> {
        if snapshot.is_empty() {
            return Err(PaymentSessionError::EmptyCart);
        }

        Ok(Self {
            snapshot,
            client_secret: None,
            status: PaymentStatus::Uninitialized,
        })
    }

    /// Current status.
    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    /// The cart this session was created from.
    pub fn snapshot(&self) -> &Cart {
        &self.snapshot
    }

    /// Secret for the provider, once ready.
    pub fn client_secret(&self) -> Option<&ClientSecret> {
        self.client_secret.as_ref()
    }

    /// Whether `cart` is still the cart this session was created from.
    pub fn matches(&self, cart: &Cart) -> bool {
        &self.snapshot == cart
    }

    /// Uninitialized → Pending.
    ///
    /// # Errors
    ///
    /// Returns an error from any other status.
    pub fn request_intent(&mut self) -> Result<(), PaymentSessionError> {
        self.transition(PaymentStatus::Uninitialized, PaymentStatus::Pending)
    }

    /// Pending → Ready, storing the secret.
    ///
    /// # Errors
    ///
    /// Returns an error from any other status.
    pub fn ready(&mut self, client_secret: ClientSecret) -> Result<(), PaymentSessionError> {
        self.transition(PaymentStatus::Pending, PaymentStatus::Ready)?;
        self.client_secret = Some(client_secret);

        Ok(())
    }

    /// Ready → Submitting.
    ///
    /// # Errors
    ///
    /// Returns an error from any other status.
    pub fn submit(&mut self) -> Result<(), PaymentSessionError> {
        self.transition(PaymentStatus::Ready, PaymentStatus::Submitting)
    }

    /// Submitting → Succeeded.
    ///
    /// # Errors
    ///
    /// Returns an error from any other status.
    pub fn succeed(&mut self) -> Result<(), PaymentSessionError> {
        self.transition(PaymentStatus::Submitting, PaymentStatus::Succeeded)
    }

    /// Submitting → Failed.
    ///
    /// # Errors
    ///
    /// Returns an error from any other status.
    pub fn fail(&mut self) -> Result<(), PaymentSessionError> {
        self.transition(PaymentStatus::Submitting, PaymentStatus::Failed)
    }

    fn transition(
        &mut self,
        from: PaymentStatus,
        to: PaymentStatus,
    ) -> Result<(), PaymentSessionError> {
        if self.status != from {
            return Err(PaymentSessionError::InvalidTransition {
                from: self.status,
                to,
            });
        }

        self.status = to;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        prices::Price,
        products::{Product, ProductId},
        stores::StoreId,
    };

    use super::*;

    fn cart() -> Cart {
        let mut cart = Cart::new();

        cart.add(&Product::new(
            ProductId::new(),
            "Empanada",
            Price::new(2_000),
            StoreId::new(),
        ));

        cart
    }

    #[test]
    fn empty_cart_cannot_start_a_session() {
        assert_eq!(
            PaymentSession::new(Cart::new()).err(),
            Some(PaymentSessionError::EmptyCart)
        );
    }

    #[test]
    fn happy_path_walks_every_status() -> TestResult {
        let mut session = PaymentSession::new(cart())?;
        assert_eq!(session.status(), PaymentStatus::Uninitialized);

        session.request_intent()?;
        assert_eq!(session.status(), PaymentStatus::Pending);

        session.ready(ClientSecret::new("pi_1_secret_2"))?;
        assert_eq!(session.status(), PaymentStatus::Ready);
        assert_eq!(
            session.client_secret().map(ClientSecret::expose),
            Some("pi_1_secret_2")
        );

        session.submit()?;
        session.succeed()?;

        assert!(session.status().is_terminal());

        Ok(())
    }

    #[test]
    fn cannot_submit_before_the_secret_arrives() -> TestResult {
        let mut session = PaymentSession::new(cart())?;
        session.request_intent()?;

        assert_eq!(
            session.submit(),
            Err(PaymentSessionError::InvalidTransition {
                from: PaymentStatus::Pending,
                to: PaymentStatus::Submitting,
            })
        );

        Ok(())
    }

    #[test]
    fn terminal_sessions_cannot_be_resubmitted() -> TestResult {
        let mut session = PaymentSession::new(cart())?;
        session.request_intent()?;
        session.ready(ClientSecret::new("pi_1_secret_2"))?;
        session.submit()?;
        session.fail()?;

        assert!(session.submit().is_err());
        assert!(session.request_intent().is_err());

        Ok(())
    }

    #[test]
    fn session_only_matches_its_own_snapshot() -> TestResult {
        let snapshot = cart();
        let session = PaymentSession::new(snapshot.clone())?;

        let mut changed = snapshot.clone();
        changed.add(&Product::new(
            ProductId::new(),
            "Pandebono",
            Price::new(1_000),
            StoreId::new(),
        ));

        assert!(session.matches(&snapshot));
        assert!(!session.matches(&changed));

        Ok(())
    }

    #[test]
    fn debug_output_hides_the_secret() {
        let secret = ClientSecret::new("pi_1_secret_2");

        assert_eq!(format!("{secret:?}"), "ClientSecret(..)");
    }
}
