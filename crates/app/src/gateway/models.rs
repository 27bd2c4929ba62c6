//! Gateway wire models.

use domicilios::{
    cart::CartLine,
    checkout::ClientSecret,
    prices::Price,
    stores::StoreId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::auth::UserId;

/// Body for the `create-payment-intent` function.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentIntentRequest {
    /// Cart lines being paid for
    pub items: Vec<CartLine>,

    /// Paying user
    #[serde(rename = "userId")]
    pub user_id: UserId,
}

/// A payment intent minted by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    /// Secret handed to the payment provider
    pub client_secret: ClientSecret,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PaymentIntentResponse {
    #[serde(default, rename = "clientSecret")]
    pub client_secret: Option<String>,

    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

/// Row inserted into `products`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProductRow {
    /// Product name
    pub name: String,

    /// Product category
    pub category: String,

    /// List price
    pub price: Price,

    /// Discount percentage
    pub discount: Decimal,

    /// Units in stock
    pub stock: u32,

    /// Description
    pub description: String,

    /// Image
    pub image_url: Option<String>,

    /// Owning store
    pub store_id: StoreId,
}

#[derive(Debug, Serialize)]
pub(crate) struct PasswordGrant<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    pub user: TokenUser,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenUser {
    pub id: UserId,
}

/// Error bodies use different keys depending on which backend service
/// produced them.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub msg: Option<String>,

    #[serde(default)]
    pub error_description: Option<String>,

    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

impl ErrorBody {
    pub(crate) fn into_message(self) -> Option<String> {
        self.message
            .or(self.error_description)
            .or(self.msg)
            .or_else(|| self.error.map(|error| describe_error_value(&error)))
    }
}

/// Render an `error` payload, which may be a string or an object with a
/// `message`.
pub(crate) fn describe_error_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(message) => message.clone(),
        serde_json::Value::Object(object) => object
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map_or_else(|| value.to_string(), ToString::to_string),
        other => other.to_string(),
    }
}
