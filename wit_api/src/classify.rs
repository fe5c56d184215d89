//! Turns a decoded Wit error payload into a typed classification.

use serde_json::{Map, Value};

use crate::errors::ErrorCode;

/// Code Wit sends when the access token is missing or rejected.
pub const NO_AUTH_CODE: &str = "no-auth";

/// Message used when the payload names no error at all.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error from Wit.";

/// Which kind of error a payload represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Authorization,
    Api,
}

/// The outcome of classifying an error payload. Built once per erroring response.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub kind: ErrorKind,
    pub message: String,
    pub code: ErrorCode,
    pub http_status: u16,
}

/// Returns true when the decoded body carries an `error` or `errors` key.
pub fn is_error_payload(decoded: &Map<String, Value>) -> bool {
    ["error", "errors"]
        .iter()
        .any(|key| decoded.get(*key).is_some_and(|v| !v.is_null()))
}

/// Classifies an error payload returned with `http_status`.
pub fn classify(decoded: &Map<String, Value>, http_status: u16) -> Classification {
    let code = ErrorCode::from_value(decoded.get("code"));
    let message = error_message(decoded);

    if code == ErrorCode::Text(NO_AUTH_CODE.to_string()) {
        return Classification {
            kind: ErrorKind::Authorization,
            message,
            code,
            http_status: 401,
        };
    }

    Classification {
        kind: ErrorKind::Api,
        message,
        code,
        http_status,
    }
}

fn error_message(decoded: &Map<String, Value>) -> String {
    if let Some(error) = decoded.get("error").filter(|v| !v.is_null()) {
        return render(error);
    }

    // The last entry of `errors` becomes the message.
    let last = match decoded.get("errors") {
        Some(Value::Array(items)) => items.last(),
        Some(Value::Object(map)) => map.values().last(),
        Some(Value::Null) | None => None,
        Some(scalar) => Some(scalar),
    };

    last.map(render)
        .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string())
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
