//! Transport backed by `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use super::{RawResponse, Transport};
use crate::{errors::TransportError, request::Headers, Method};

/// Time allowed to establish a connection, separate from the request timeout.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Sends requests with a shared `reqwest::Client` (rustls, gzip).
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                TransportError::Http(e)
            })?;
        Ok(Self { client })
    }

    /// Wraps a preconfigured client, e.g. one with a proxy or custom roots.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(
        &self,
        url: &str,
        method: Method,
        body: &str,
        headers: &Headers,
        timeout: Duration,
    ) -> Result<RawResponse, TransportError> {
        let method = match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        };

        let resp = self
            .client
            .request(method, url)
            .headers(to_header_map(headers)?)
            .body(body.to_string())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout(timeout)
                } else {
                    TransportError::Http(e)
                }
            })?;

        let status = resp.status().as_u16();
        let raw_headers = headers_as_string(resp.headers());
        let body = resp.text().await?;

        Ok(RawResponse::new(raw_headers, body, status))
    }
}

fn to_header_map(headers: &Headers) -> Result<HeaderMap, TransportError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| TransportError::InvalidHeader(name.clone()))?;
        let header_value =
            HeaderValue::from_str(value).map_err(|_| TransportError::InvalidHeader(name.clone()))?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

/// Joins response headers into `Name: v1, v2` lines separated by CRLF.
fn headers_as_string(headers: &HeaderMap) -> String {
    headers
        .keys()
        .map(|name| {
            let values: Vec<&str> = headers
                .get_all(name)
                .iter()
                .filter_map(|v| v.to_str().ok())
                .collect();
            format!("{}: {}", name, values.join(", "))
        })
        .collect::<Vec<_>>()
        .join("\r\n")
}
