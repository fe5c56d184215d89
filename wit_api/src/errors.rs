//! Error types for the API client.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::classify::Classification;
use crate::response::WitResponse;

/// Errors that can occur when building, sending, or decoding Wit requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The facade or transport factory was given an unusable configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// A request failed local validation before anything was sent.
    #[error("Validation error: {0}")]
    Validation(String),
    /// The transport could not complete the HTTP exchange.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
    /// Wit rejected the access token (`code: "no-auth"`).
    #[error("Authorization failed: {}", .0.message())]
    Authorization(Box<ResponseError>),
    /// Wit returned any other error payload.
    #[error("Wit API error ({}): {}", .0.code(), .0.message())]
    Api(Box<ResponseError>),
}

impl Error {
    /// The response-level error carried by `Authorization` and `Api`.
    pub fn response_error(&self) -> Option<&ResponseError> {
        match self {
            Self::Authorization(e) | Self::Api(e) => Some(e),
            _ => None,
        }
    }
}

/// Failures raised by a [`Transport`](crate::Transport) implementation.
#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
    #[error("{0}")]
    Other(String),
}

/// The `code` field of a Wit error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ErrorCode {
    Text(String),
    Number(i64),
    /// The payload carried no usable `code`.
    Unknown,
}

impl ErrorCode {
    pub(crate) fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(s)) => Self::Text(s.clone()),
            Some(Value::Number(n)) => match n.as_i64() {
                Some(i) => Self::Number(i),
                None => Self::Text(n.to_string()),
            },
            Some(Value::Bool(b)) => Self::Text(b.to_string()),
            _ => Self::Unknown,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{}", s),
            Self::Number(n) => write!(f, "{}", n),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// An error payload returned by Wit, together with the response it came from.
#[derive(Debug, Clone)]
pub struct ResponseError {
    classification: Classification,
    response: WitResponse,
}

impl ResponseError {
    pub(crate) fn new(classification: Classification, response: WitResponse) -> Self {
        Self {
            classification,
            response,
        }
    }

    pub fn message(&self) -> &str {
        &self.classification.message
    }

    pub fn code(&self) -> &ErrorCode {
        &self.classification.code
    }

    /// HTTP status of the error. Authorization failures always report 401,
    /// whatever the wire status was.
    pub fn http_status_code(&self) -> u16 {
        self.classification.http_status
    }

    /// `error_subcode` from the payload, or -1.
    pub fn sub_error_code(&self) -> i64 {
        self.response_data()
            .get("error_subcode")
            .and_then(|v| match v {
                Value::Number(n) => n.as_i64(),
                Value::String(s) => s.parse().ok(),
                _ => None,
            })
            .unwrap_or(-1)
    }

    /// `type` from the payload, or an empty string.
    pub fn error_type(&self) -> &str {
        self.response_data()
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    pub fn raw_response(&self) -> &str {
        self.response.body()
    }

    pub fn response_data(&self) -> &Map<String, Value> {
        self.response.decoded_body()
    }

    pub fn response(&self) -> &WitResponse {
        &self.response
    }

    pub fn into_response(self) -> WitResponse {
        self.response
    }
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (code {}, HTTP {})",
            self.message(),
            self.code(),
            self.http_status_code()
        )
    }
}

impl std::error::Error for ResponseError {}
