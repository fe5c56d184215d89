//! HTTP client for the Wit.ai API.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::{
    request::{Headers, WitRequest},
    response::WitResponse,
    transport::Transport,
    Error, Method,
};

/// Production Wit API URL.
pub const BASE_WIT_URL: &str = "https://api.wit.ai";

/// Timeout for a normal request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Everything a transport needs to perform one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub url: String,
    pub method: Method,
    pub headers: Headers,
    pub body: String,
}

/// Sends [`WitRequest`]s through a [`Transport`] and decodes the results.
///
/// Counts every call that reached Wit, including ones that came back as
/// API errors. The counter is atomic so a client can be shared across tasks.
#[derive(Debug)]
pub struct WitClient {
    transport: Arc<dyn Transport>,
    /// Base URL for the API. Defaults to `https://api.wit.ai`.
    base_url: String,
    timeout: Duration,
    request_count: AtomicU64,
}

impl WitClient {
    /// Creates a client pointing at the production Wit API.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base_url: BASE_WIT_URL.to_string(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
            request_count: AtomicU64::new(0),
        }
    }

    /// Points the client at a different host. Used for testing with wiremock.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    pub fn set_transport(&mut self, transport: Arc<dyn Transport>) {
        self.transport = transport;
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Number of calls this client has completed.
    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Renders `request` into the URL, method, headers, and JSON body to send.
    ///
    /// Sets `Content-Type` and `Authorization` on the request itself, replacing
    /// any headers of the same name.
    pub fn prepare_request_message(&self, request: &mut WitRequest) -> Result<PreparedRequest, Error> {
        let url = format!("{}{}", self.base_url, request.url()?);
        let method = request.validate_method()?;

        let body = serde_json::to_string(&request.post_params()).map_err(|e| {
            tracing::error!("Failed to encode request body: {}", e);
            Error::Validation(format!("Request parameters are not valid JSON: {}", e))
        })?;

        let bearer = format!("Bearer {}", request.access_token().unwrap_or_default());
        request.set_headers(Headers::from([
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Authorization".to_string(), bearer),
        ]));

        Ok(PreparedRequest {
            url,
            method,
            headers: request.headers(),
            body,
        })
    }

    /// Sends `request` to Wit.
    ///
    /// Transport failures are returned unchanged. A response carrying an
    /// `error`/`errors` payload is returned as [`Error::Authorization`] or
    /// [`Error::Api`].
    pub async fn send_request(&self, mut request: WitRequest) -> Result<WitResponse, Error> {
        let prepared = self.prepare_request_message(&mut request)?;
        tracing::debug!(method = %prepared.method, url = %prepared.url, "Sending Wit request");

        let raw = self
            .transport
            .send(
                &prepared.url,
                prepared.method,
                &prepared.body,
                &prepared.headers,
                self.timeout,
            )
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach Wit: {}", e);
                Error::Transport(e)
            })?;

        self.request_count.fetch_add(1, Ordering::SeqCst);

        let status = raw.http_status_code();
        let headers = raw.header_map();
        let response = WitResponse::new(request, raw.into_body(), status, headers);

        if let Some(c) = response.classification() {
            tracing::warn!(
                status = c.http_status,
                code = %c.code,
                "Wit returned an error: {}",
                c.message
            );
        }

        response.into_result()
    }
}
