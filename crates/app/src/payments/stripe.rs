//! Stripe payment intent confirmation.

use async_trait::async_trait;
use domicilios::checkout::ClientSecret;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::payments::{
    PaymentProvider, PaymentProviderError,
    models::{
        ConfirmResponse, ErrorEnvelope, PaymentConfirmation, PaymentMethod, ProviderErrorKind,
        ProviderFailure,
    },
};

/// Configuration for the Stripe API.
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// API base URL, e.g. `"https://api.stripe.com"`.
    pub api_url: String,

    /// Publishable key; confirmation with a client secret needs no secret key.
    pub publishable_key: String,
}

/// Stripe client confirming payment intents on behalf of the shopper.
#[derive(Debug, Clone)]
pub struct StripeClient {
    config: StripeConfig,
    http: Client,
}

#[derive(Debug, Serialize)]
struct ConfirmForm<'a> {
    client_secret: &'a str,
    payment_method: &'a str,
    return_url: &'a str,
    key: &'a str,
}

impl StripeClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn interpret(response: ConfirmResponse) -> Result<PaymentConfirmation, PaymentProviderError> {
        match response.status.as_str() {
            "succeeded" | "processing" => Ok(PaymentConfirmation::Succeeded),
            "requires_action" => response
                .next_action
                .and_then(|action| action.redirect_to_url)
                .map(|redirect| PaymentConfirmation::RequiresRedirect { url: redirect.url })
                .ok_or_else(|| {
                    PaymentProviderError::UnexpectedResponse(
                        "requires_action without a redirect url".to_string(),
                    )
                }),
            "requires_payment_method" => Ok(PaymentConfirmation::Failed(
                response.last_payment_error.map_or_else(
                    || ProviderFailure {
                        kind: ProviderErrorKind::Other("requires_payment_method".to_string()),
                        message: None,
                    },
                    ProviderFailure::from,
                ),
            )),
            other => Err(PaymentProviderError::UnexpectedResponse(format!(
                "unhandled payment intent status {other}"
            ))),
        }
    }
}

/// The intent id is the prefix of the client secret before `_secret_`.
fn intent_id(client_secret: &ClientSecret) -> Result<&str, PaymentProviderError> {
    match client_secret.expose().split_once("_secret_") {
        Some((id, _)) if !id.is_empty() => Ok(id),
        _ => Err(PaymentProviderError::InvalidClientSecret),
    }
}

#[async_trait]
impl PaymentProvider for StripeClient {
    async fn confirm_payment(
        &self,
        client_secret: &ClientSecret,
        payment_method: &PaymentMethod,
        return_url: &str,
    ) -> Result<PaymentConfirmation, PaymentProviderError> {
        let intent = intent_id(client_secret)?;
        let url = format!(
            "{}/v1/payment_intents/{intent}/confirm",
            self.config.api_url.trim_end_matches('/')
        );

        debug!(intent, "confirming payment intent");

        let response = self
            .http
            .post(&url)
            .form(&ConfirmForm {
                client_secret: client_secret.expose(),
                payment_method: payment_method.as_str(),
                return_url,
                key: &self.config.publishable_key,
            })
            .send()
            .await?;

        if response.status().is_success() {
            return Self::interpret(response.json().await?);
        }

        let text = response.text().await?;

        serde_json::from_str::<ErrorEnvelope>(&text)
            .map(|envelope| PaymentConfirmation::Failed(envelope.error.into()))
            .map_err(|_unparsed| PaymentProviderError::UnexpectedResponse(text))
    }
}
