//! Test Helpers

use std::{
    collections::HashMap,
    io,
    sync::{Arc, Mutex, PoisonError},
};

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::IntoResponse,
};
use tokio::net::TcpListener;

/// A request captured by [`CannedServer`].
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordedRequest {
    pub method: String,
    pub target: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl RecordedRequest {
    /// Header value by lowercase name.
    pub(crate) fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone)]
struct CannedState {
    status: StatusCode,
    body: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// HTTP server on a random local port that answers every request with the
/// same status and JSON body, recording what it received.
#[derive(Debug)]
pub(crate) struct CannedServer {
    pub url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl CannedServer {
    pub(crate) async fn start(status: u16, body: &str) -> io::Result<Self> {
        let status = StatusCode::from_u16(status)
            .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let url = format!("http://{}", listener.local_addr()?);
        let requests = Arc::new(Mutex::new(Vec::new()));

        let state = CannedState {
            status,
            body: body.to_string(),
            requests: Arc::clone(&requests),
        };

        let app = Router::new().fallback(answer).with_state(state);

        tokio::spawn(async move {
            _ = axum::serve(listener, app).await;
        });

        Ok(Self { url, requests })
    }

    /// The single request received so far.
    pub(crate) fn only_request(&self) -> Result<RecordedRequest, String> {
        let requests = self.requests.lock().unwrap_or_else(PoisonError::into_inner);

        match requests.as_slice() {
            [request] => Ok(request.clone()),
            other => Err(format!("expected exactly one request, got {}", other.len())),
        }
    }
}

/// Record the request, then reply with the canned status and body.
async fn answer(
    State(state): State<CannedState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let headers = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();

    let target = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), ToString::to_string);

    state
        .requests
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(RecordedRequest {
            method: method.to_string(),
            target,
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
        });

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body,
    )
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpStream,
    };

    use super::*;

    #[tokio::test]
    async fn records_chunked_bodies() -> TestResult {
        let server = CannedServer::start(202, r#"{"ok":true}"#).await?;
        let address = server.url.trim_start_matches("http://");

        let mut stream = TcpStream::connect(address).await?;
        stream
            .write_all(
                concat!(
                    "POST /rest/v1/products?select=id HTTP/1.1\r\n",
                    "host: localhost\r\n",
                    "apikey: anon-key\r\n",
                    "transfer-encoding: chunked\r\n",
                    "connection: close\r\n",
                    "\r\n",
                    "8\r\n{\"name\":\r\n",
                    "6\r\n\"Pan\"}\r\n",
                    "0\r\n\r\n",
                )
                .as_bytes(),
            )
            .await?;

        let mut response = String::new();
        stream.read_to_string(&mut response).await?;

        assert!(response.starts_with("HTTP/1.1 202"), "unexpected reply: {response}");
        assert!(response.ends_with(r#"{"ok":true}"#), "unexpected reply: {response}");

        let request = server.only_request()?;

        assert_eq!(request.method, "POST");
        assert_eq!(request.target, "/rest/v1/products?select=id");
        assert_eq!(request.header("apikey"), Some("anon-key"));
        assert_eq!(request.header("transfer-encoding"), Some("chunked"));
        assert_eq!(request.body, r#"{"name":"Pan"}"#);

        Ok(())
    }
}
