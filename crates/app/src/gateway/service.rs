//! Gateway services.

use async_trait::async_trait;
use domicilios::{
    checkout::ClientSecret,
    products::{Product, ProductId},
    stores::{Store, StoreId},
};
use mockall::automock;
use tracing::{debug, warn};

use crate::{
    auth::{Credentials, Session},
    gateway::{
        GatewayClient, GatewayError,
        models::{
            NewProductRow, PasswordGrant, PaymentIntent, PaymentIntentRequest,
            PaymentIntentResponse, TokenResponse, describe_error_value,
        },
    },
};

const PAYMENT_INTENT_FUNCTION: &str = "create-payment-intent";

#[async_trait]
impl CatalogGateway for GatewayClient {
    async fn list_stores(&self) -> Result<Vec<Store>, GatewayError> {
        self.select("stores", &[("select", "*".to_string())], None)
            .await
    }

    async fn get_store(&self, store_id: StoreId) -> Result<Option<Store>, GatewayError> {
        let stores: Vec<Store> = self
            .select(
                "stores",
                &[
                    ("select", "*".to_string()),
                    ("id", format!("eq.{store_id}")),
                ],
                None,
            )
            .await?;

        Ok(stores.into_iter().next())
    }

    async fn list_products(
        &self,
        store_id: Option<StoreId>,
    ) -> Result<Vec<Product>, GatewayError> {
        let mut query = vec![("select", "*,stores(name)".to_string())];

        if let Some(store_id) = store_id {
            query.push(("store_id", format!("eq.{store_id}")));
        }

        self.select("products", &query, None).await
    }

    async fn get_product(&self, product_id: ProductId) -> Result<Option<Product>, GatewayError> {
        let products: Vec<Product> = self
            .select(
                "products",
                &[
                    ("select", "*,stores(name)".to_string()),
                    ("id", format!("eq.{product_id}")),
                ],
                None,
            )
            .await?;

        Ok(products.into_iter().next())
    }

    async fn create_product(
        &self,
        session: &Session,
        row: NewProductRow,
    ) -> Result<(), GatewayError> {
        self.insert("products", &row, Some(session)).await
    }
}

#[async_trait]
impl AuthGateway for GatewayClient {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, GatewayError> {
        let response: TokenResponse = self
            .password_grant(&PasswordGrant {
                email: &credentials.email,
                password: &credentials.password,
            })
            .await?;

        debug!(user = %response.user.id, "signed in");

        Ok(Session::new(response.user.id, response.access_token))
    }
}

#[async_trait]
impl PaymentIntentGateway for GatewayClient {
    async fn create_payment_intent(
        &self,
        session: &Session,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, GatewayError> {
        let response: PaymentIntentResponse = self
            .invoke(PAYMENT_INTENT_FUNCTION, request, Some(session))
            .await?;

        if let Some(error) = response.error {
            let message = describe_error_value(&error);

            warn!("payment intent function reported an error: {message}");

            return Err(GatewayError::Function(message));
        }

        let client_secret = response.client_secret.ok_or_else(|| {
            GatewayError::UnexpectedResponse("missing clientSecret".to_string())
        })?;

        Ok(PaymentIntent {
            client_secret: ClientSecret::new(client_secret),
        })
    }
}

/// Store and product catalog reads and writes.
#[automock]
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Retrieves all stores.
    async fn list_stores(&self) -> Result<Vec<Store>, GatewayError>;

    /// Retrieve a single store, if it exists.
    async fn get_store(&self, store_id: StoreId) -> Result<Option<Store>, GatewayError>;

    /// Retrieves products with their store name, optionally for one store.
    async fn list_products(
        &self,
        store_id: Option<StoreId>,
    ) -> Result<Vec<Product>, GatewayError>;

    /// Retrieve a single product, if it exists.
    async fn get_product(&self, product_id: ProductId) -> Result<Option<Product>, GatewayError>;

    /// Inserts a product on behalf of the signed-in store owner.
    async fn create_product(
        &self,
        session: &Session,
        row: NewProductRow,
    ) -> Result<(), GatewayError>;
}

/// Password authentication.
#[automock]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchange credentials for a session.
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, GatewayError>;
}

/// Server-side payment intent creation.
#[automock]
#[async_trait]
pub trait PaymentIntentGateway: Send + Sync {
    /// Ask the backend to mint an intent for the given cart lines.
    async fn create_payment_intent(
        &self,
        session: &Session,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, GatewayError>;
}
