//! The seam between the client and the network.
//!
//! A [`Transport`] performs one HTTP exchange and hands back the untouched
//! [`RawResponse`]. Everything Wit-specific (URL rendering, auth headers,
//! decoding) happens in [`WitClient`](crate::WitClient), so a transport only
//! has to move bytes.

mod http;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

pub use self::http::{ReqwestTransport, CONNECT_TIMEOUT};
use crate::{errors::TransportError, request::Headers, Error, Method};

/// Performs a single HTTP exchange.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Sends `body` to `url` and returns the raw response. Non-2xx statuses
    /// are not errors at this level; only failures to complete the exchange are.
    async fn send(
        &self,
        url: &str,
        method: Method,
        body: &str,
        headers: &Headers,
        timeout: Duration,
    ) -> Result<RawResponse, TransportError>;
}

/// An HTTP response as returned by a transport, before any decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// CRLF-joined `Name: value1, value2` lines.
    headers: String,
    body: String,
    http_status_code: u16,
}

impl RawResponse {
    pub fn new(headers: impl Into<String>, body: impl Into<String>, http_status_code: u16) -> Self {
        Self {
            headers: headers.into(),
            body: body.into(),
            http_status_code,
        }
    }

    pub fn headers(&self) -> &str {
        &self.headers
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn http_status_code(&self) -> u16 {
        self.http_status_code
    }

    /// Parses the raw header block into a mapping keyed by lower-cased name.
    /// Status lines and lines without a `:` separator are skipped; a repeated
    /// name keeps the last line.
    pub fn header_map(&self) -> Headers {
        self.headers
            .lines()
            .filter(|line| !line.starts_with("HTTP/"))
            .filter_map(|line| line.split_once(':'))
            .map(|(name, value)| (name.trim().to_ascii_lowercase(), value.trim().to_string()))
            .filter(|(name, _)| !name.is_empty())
            .collect()
    }

    pub fn into_body(self) -> String {
        self.body
    }
}

/// Which transport a [`Wit`](crate::Wit) instance should use.
#[derive(Clone, Default)]
pub enum HttpClientHandler {
    /// Pick the best transport available.
    #[default]
    Auto,
    /// The built-in `reqwest` transport.
    Reqwest,
    /// A caller-supplied transport.
    Custom(Arc<dyn Transport>),
}

impl fmt::Debug for HttpClientHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "Auto"),
            Self::Reqwest => write!(f, "Reqwest"),
            Self::Custom(t) => f.debug_tuple("Custom").field(t).finish(),
        }
    }
}

impl FromStr for HttpClientHandler {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "auto" => Ok(Self::Auto),
            "reqwest" => Ok(Self::Reqwest),
            other => Err(Error::Configuration(format!(
                "The http client handler must be \"auto\" or \"reqwest\", got \"{}\"",
                other
            ))),
        }
    }
}

/// Builds the transport selected by `handler`.
pub fn create_transport(handler: &HttpClientHandler) -> Result<Arc<dyn Transport>, Error> {
    match handler {
        HttpClientHandler::Custom(transport) => Ok(Arc::clone(transport)),
        HttpClientHandler::Reqwest => Ok(Arc::new(ReqwestTransport::new()?)),
        HttpClientHandler::Auto => detect_default_transport(),
    }
}

// `reqwest` is the only built-in transport, so detection always lands on it.
fn detect_default_transport() -> Result<Arc<dyn Transport>, Error> {
    Ok(Arc::new(ReqwestTransport::new()?))
}
