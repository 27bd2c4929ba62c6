//! Payment provider models.

use serde::Deserialize;

/// Provider-side identifier of the payment method to charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentMethod(String);

impl PaymentMethod {
    /// Wrap a payment method id such as `pm_card_visa`.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Category of a provider-reported failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// The card was declined or could not be charged.
    Card,

    /// The payment details were incomplete or malformed.
    Validation,

    /// Any other provider error type.
    Other(String),
}

impl ProviderErrorKind {
    /// Classify the provider's `error.type` string.
    pub fn from_type(kind: &str) -> Self {
        match kind {
            "card_error" => Self::Card,
            "validation_error" => Self::Validation,
            other => Self::Other(other.to_string()),
        }
    }

    /// Whether the provider message is meant to be shown to the shopper.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::Card | Self::Validation)
    }
}

/// A failure reported by the provider for a confirmation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFailure {
    /// Error category
    pub kind: ProviderErrorKind,

    /// Human-readable message from the provider
    pub message: Option<String>,
}

/// Authoritative outcome of a confirmation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentConfirmation {
    /// Payment completed without leaving the page.
    Succeeded,

    /// The shopper must visit `url` to finish (e.g. 3-D Secure).
    RequiresRedirect {
        /// Where to send the shopper
        url: String,
    },

    /// The provider refused the payment.
    Failed(ProviderFailure),
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConfirmResponse {
    pub status: String,

    #[serde(default)]
    pub next_action: Option<NextAction>,

    #[serde(default)]
    pub last_payment_error: Option<ProviderErrorBody>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NextAction {
    #[serde(default)]
    pub redirect_to_url: Option<RedirectToUrl>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RedirectToUrl {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProviderErrorBody {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub message: Option<String>,
}

impl From<ProviderErrorBody> for ProviderFailure {
    fn from(body: ProviderErrorBody) -> Self {
        Self {
            kind: ProviderErrorKind::from_type(&body.kind),
            message: body.message,
        }
    }
}
