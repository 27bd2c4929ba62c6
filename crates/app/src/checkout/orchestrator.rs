//! Checkout Orchestrator

use std::{fmt, sync::Arc};

use domicilios::{
    cart::CartStore,
    checkout::{OrderSummary, PaymentSession, PaymentSessionError, PaymentStatus},
};
use tracing::{error, info, warn};

use crate::{
    auth::Session,
    checkout::{
        Appearance, CheckoutError, CheckoutSettings, PaymentElementOptions, PaymentError,
        PreconditionError, Redirect,
    },
    gateway::{PaymentIntentGateway, PaymentIntentRequest},
    notifications::{Notification, Notifier},
    payments::{
        PaymentConfirmation, PaymentMethod, PaymentProvider, ProviderErrorKind, ProviderFailure,
    },
};

/// How a submitted checkout ended without a payment error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutOutcome {
    /// Final session status; `Submitting` while an off-page step is pending.
    pub status: PaymentStatus,

    /// Where to send the shopper.
    pub redirect: Redirect,
}

/// Sequences one checkout attempt: guard, mint an intent, confirm with the
/// provider, then settle the cart.
#[derive(Clone)]
pub struct CheckoutOrchestrator {
    intents: Arc<dyn PaymentIntentGateway>,
    provider: Arc<dyn PaymentProvider>,
    notifier: Arc<dyn Notifier>,
    cart: CartStore,
    settings: CheckoutSettings,
}

impl fmt::Debug for CheckoutOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutOrchestrator")
            .field("cart", &self.cart)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl CheckoutOrchestrator {
    /// Wire an orchestrator around the shopper's cart.
    pub fn new(
        intents: Arc<dyn PaymentIntentGateway>,
        provider: Arc<dyn PaymentProvider>,
        notifier: Arc<dyn Notifier>,
        cart: CartStore,
        settings: CheckoutSettings,
    ) -> Self {
        Self {
            intents,
            provider,
            notifier,
            cart,
            settings,
        }
    }

    /// Settings in effect.
    pub fn settings(&self) -> &CheckoutSettings {
        &self.settings
    }

    /// Start an attempt for the current cart.
    ///
    /// No intent is requested unless a user is signed in and the cart has
    /// lines. Failures leave the cart untouched.
    ///
    /// # Errors
    ///
    /// Returns a precondition error, or [`CheckoutError::Gateway`] when the
    /// intent could not be created. [`CheckoutError::redirect`] says where to
    /// send the shopper.
    pub async fn begin(
        &self,
        session: Option<&Session>,
    ) -> Result<ReadyCheckout<'_>, CheckoutError> {
        let Some(session) = session else {
            self.notifier.notify(Notification::destructive(
                "Sign in to continue",
                "You need an account to complete your order.",
            ));

            return Err(PreconditionError::NotAuthenticated.into());
        };

        let mut payment =
            PaymentSession::new(self.cart.snapshot()).map_err(|error| match error {
                PaymentSessionError::EmptyCart => {
                    CheckoutError::from(PreconditionError::EmptyCart)
                }
                other @ PaymentSessionError::InvalidTransition { .. } => {
                    CheckoutError::from(other)
                }
            })?;

        payment.request_intent()?;

        let request = PaymentIntentRequest {
            items: payment.snapshot().lines().to_vec(),
            user_id: session.user_id,
        };

        info!(
            user = %session.user_id,
            lines = request.items.len(),
            "requesting payment intent"
        );

        let intent = match self.intents.create_payment_intent(session, &request).await {
            Ok(intent) => intent,
            Err(source) => {
                warn!("failed to create payment intent: {source}");

                self.notifier.notify(Notification::destructive(
                    "Error",
                    "Could not start the payment process.",
                ));

                return Err(CheckoutError::Gateway(source));
            }
        };

        payment.ready(intent.client_secret.clone())?;

        info!("payment form ready");

        let summary = OrderSummary::new(payment.snapshot(), self.settings.shipping_fee);

        Ok(ReadyCheckout {
            orchestrator: self,
            payment,
            summary,
            options: PaymentElementOptions {
                client_secret: intent.client_secret,
                appearance: Appearance::default(),
            },
        })
    }

    fn settle(&self, succeeded: bool) {
        if self.settings.clear_policy.clears(succeeded) {
            self.cart.clear_cart();
        }
    }

    fn payment_failed(&self, failure: PaymentError) -> CheckoutError {
        let title = match failure {
            PaymentError::Unexpected => "Unexpected error",
            PaymentError::Card(_) | PaymentError::Validation(_) => "Payment error",
        };

        self.notifier
            .notify(Notification::destructive(title, failure.user_message()));

        self.settle(false);

        CheckoutError::Payment(failure)
    }
}

/// A checkout attempt whose payment form can be shown.
///
/// Dropping it abandons the attempt without contacting the provider.
#[derive(Debug)]
pub struct ReadyCheckout<'a> {
    orchestrator: &'a CheckoutOrchestrator,
    payment: PaymentSession,
    summary: OrderSummary,
    options: PaymentElementOptions,
}

impl ReadyCheckout<'_> {
    /// Lines and totals being paid for.
    pub fn summary(&self) -> &OrderSummary {
        &self.summary
    }

    /// Options for rendering the payment form.
    pub fn options(&self) -> &PaymentElementOptions {
        &self.options
    }

    /// Current payment status.
    pub fn status(&self) -> PaymentStatus {
        self.payment.status()
    }

    /// Confirm the payment with `payment_method` and settle the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::StaleCart`] if the cart changed since the
    /// intent was created, or [`CheckoutError::Payment`] when the provider
    /// refuses the payment or cannot be reached.
    pub async fn submit(
        mut self,
        payment_method: &PaymentMethod,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        let orchestrator = self.orchestrator;

        if !self.payment.matches(&orchestrator.cart.snapshot()) {
            warn!("cart changed after the payment intent was created");

            orchestrator.notifier.notify(Notification::info(
                "Cart updated",
                "Your cart changed. Review your order before paying.",
            ));

            return Err(CheckoutError::StaleCart);
        }

        self.payment.submit()?;

        info!("submitting payment");

        let confirmation = orchestrator
            .provider
            .confirm_payment(
                &self.options.client_secret,
                payment_method,
                &orchestrator.settings.return_url(),
            )
            .await;

        match confirmation {
            Ok(PaymentConfirmation::Succeeded) => {
                self.payment.succeed()?;
                orchestrator.settle(true);

                info!("payment succeeded");

                Ok(CheckoutOutcome {
                    status: self.payment.status(),
                    redirect: Redirect::Dashboard,
                })
            }
            Ok(PaymentConfirmation::RequiresRedirect { url }) => {
                info!("payment requires an off-page step");

                Ok(CheckoutOutcome {
                    status: self.payment.status(),
                    redirect: Redirect::External(url),
                })
            }
            Ok(PaymentConfirmation::Failed(failure)) => {
                self.payment.fail()?;

                info!(kind = ?failure.kind, "payment refused");

                Err(orchestrator.payment_failed(classify(failure)))
            }
            Err(source) => {
                self.payment.fail()?;

                error!("payment confirmation failed: {source}");

                Err(orchestrator.payment_failed(PaymentError::Unexpected))
            }
        }
    }
}

fn classify(failure: ProviderFailure) -> PaymentError {
    match (failure.kind, failure.message) {
        (ProviderErrorKind::Card, Some(message)) => PaymentError::Card(message),
        (ProviderErrorKind::Validation, Some(message)) => PaymentError::Validation(message),
        _ => PaymentError::Unexpected,
    }
}
