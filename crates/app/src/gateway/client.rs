//! HTTP client for the backend's REST, auth and function endpoints.

use reqwest::{Client, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::{
    auth::Session,
    gateway::{GatewayError, models::ErrorBody},
};

/// Configuration for connecting to the backend.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Project base URL, e.g. `"https://xyz.supabase.co"`.
    pub url: String,

    /// Public (anon) API key sent with every request.
    pub anon_key: String,
}

/// HTTP client for the backend.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    config: GatewayConfig,
    http: Client,
}

impl GatewayClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Select rows from `table`, filtered by `query` pairs.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or an unexpected response body.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
        session: Option<&Session>,
    ) -> Result<Vec<T>, GatewayError> {
        let url = self.endpoint(&format!("rest/v1/{table}"));

        debug!(table, "selecting rows");

        let request = self.authorize(self.http.get(&url).query(query), session);

        let response = Self::checked(request.send().await?).await?;

        Ok(response.json().await?)
    }

    /// Insert a single row into `table`.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or when the backend rejects the row.
    pub async fn insert<T: Serialize + Sync>(
        &self,
        table: &str,
        row: &T,
        session: Option<&Session>,
    ) -> Result<(), GatewayError> {
        let url = self.endpoint(&format!("rest/v1/{table}"));

        debug!(table, "inserting row");

        let request = self.authorize(
            self.http
                .post(&url)
                .header("Prefer", "return=minimal")
                .json(row),
            session,
        );

        Self::checked(request.send().await?).await?;

        Ok(())
    }

    /// Invoke a server-side function with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or an unexpected response body.
    pub async fn invoke<B, R>(
        &self,
        function: &str,
        body: &B,
        session: Option<&Session>,
    ) -> Result<R, GatewayError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.endpoint(&format!("functions/v1/{function}"));

        debug!(function, "invoking function");

        let request = self.authorize(self.http.post(&url).json(body), session);

        let response = Self::checked(request.send().await?).await?;

        Ok(response.json().await?)
    }

    /// Exchange an email and password for a token.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or when the credentials are refused.
    pub async fn password_grant<B, R>(&self, body: &B) -> Result<R, GatewayError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.endpoint("auth/v1/token");

        let request = self
            .authorize(self.http.post(&url), None)
            .query(&[("grant_type", "password")])
            .json(body);

        let response = Self::checked(request.send().await?).await?;

        Ok(response.json().await?)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.url.trim_end_matches('/'))
    }

    /// Attach the API key, plus the session's bearer token when signed in.
    fn authorize(&self, request: RequestBuilder, session: Option<&Session>) -> RequestBuilder {
        let bearer = session.map_or(self.config.anon_key.as_str(), |session| {
            session.access_token.as_str()
        });

        request
            .header("apikey", &self.config.anon_key)
            .bearer_auth(bearer)
    }

    async fn checked(response: Response) -> Result<Response, GatewayError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or(text);

        Err(GatewayError::Rejected { status, message })
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use serde_json::{Value, json};
    use testresult::TestResult;

    use crate::{auth::UserId, test_helpers::CannedServer};

    use super::*;

    fn client(url: &str) -> GatewayClient {
        GatewayClient::new(GatewayConfig {
            url: format!("{url}/"),
            anon_key: "anon-key".to_string(),
        })
    }

    #[tokio::test]
    async fn select_sends_filters_and_anon_credentials() -> TestResult {
        let server = CannedServer::start(200, r#"[{"name":"La Esquina"}]"#).await?;

        let rows: Vec<Value> = client(&server.url)
            .select("stores", &[("select", "*".to_string())], None)
            .await?;

        let request = server.only_request()?;

        assert_eq!(rows, vec![json!({ "name": "La Esquina" })]);
        assert_eq!(request.method, "GET");
        assert_eq!(request.target, "/rest/v1/stores?select=*");
        assert_eq!(request.header("apikey"), Some("anon-key"));
        assert_eq!(request.header("authorization"), Some("Bearer anon-key"));

        Ok(())
    }

    #[tokio::test]
    async fn session_token_replaces_anon_bearer() -> TestResult {
        let server = CannedServer::start(201, "").await?;
        let session = Session::new(UserId::new(), "user-token");

        client(&server.url)
            .insert("products", &json!({ "name": "Café" }), Some(&session))
            .await?;

        let request = server.only_request()?;

        assert_eq!(request.method, "POST");
        assert_eq!(request.header("authorization"), Some("Bearer user-token"));
        assert_eq!(request.header("prefer"), Some("return=minimal"));
        assert_eq!(serde_json::from_str::<Value>(&request.body)?, json!({ "name": "Café" }));

        Ok(())
    }

    #[tokio::test]
    async fn rejected_requests_carry_the_backend_message() -> TestResult {
        let server = CannedServer::start(400, r#"{"message":"stock must be positive"}"#).await?;

        let result = client(&server.url)
            .insert("products", &json!({}), None)
            .await;

        match result {
            Err(GatewayError::Rejected { status, message }) => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "stock must be positive");
            }
            other => return Err(format!("expected Rejected, got {other:?}").into()),
        }

        Ok(())
    }

    #[tokio::test]
    async fn password_grant_posts_to_the_token_endpoint() -> TestResult {
        let server = CannedServer::start(200, r#"{"ok":true}"#).await?;

        let response: Value = client(&server.url)
            .password_grant(&json!({ "email": "ana@example.com", "password": "pw" }))
            .await?;

        let request = server.only_request()?;

        assert_eq!(response, json!({ "ok": true }));
        assert_eq!(request.target, "/auth/v1/token?grant_type=password");

        Ok(())
    }
}
