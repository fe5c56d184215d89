//! Decoded Wit responses.
//!
//! Wit answers with a few different body shapes: JSON objects for most
//! endpoints, bare JSON scalars for some write endpoints, JSON arrays for
//! listings, and `application/x-www-form-urlencoded` pairs when exchanging
//! tokens. [`decode_body`] folds all of them into a single mapping so callers
//! only ever deal with one shape.

use serde_json::{Map, Value};
use url::form_urlencoded;

use crate::{
    classify::{classify, is_error_payload, Classification, ErrorKind},
    errors::ResponseError,
    request::{Headers, WitRequest},
    Error,
};

/// A response from Wit, decoded and classified on construction.
#[derive(Debug, Clone)]
pub struct WitResponse {
    request: WitRequest,
    http_status_code: u16,
    headers: Headers,
    body: String,
    decoded_body: Map<String, Value>,
    classification: Option<Classification>,
}

impl WitResponse {
    /// Wraps a raw body returned for `request`, decoding it immediately.
    pub fn new(
        request: WitRequest,
        body: impl Into<String>,
        http_status_code: u16,
        headers: Headers,
    ) -> Self {
        let body = body.into();
        let decoded_body = decode_body(&body);
        let classification = is_error_payload(&decoded_body)
            .then(|| classify(&decoded_body, http_status_code));

        Self {
            request,
            http_status_code,
            headers,
            body,
            decoded_body,
            classification,
        }
    }

    /// The request that produced this response.
    pub fn request(&self) -> &WitRequest {
        &self.request
    }

    pub fn access_token(&self) -> Option<&str> {
        self.request.access_token()
    }

    pub fn http_status_code(&self) -> u16 {
        self.http_status_code
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// The body exactly as received.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The body as a mapping. Never fails; unreadable bodies decode to `{}`.
    pub fn decoded_body(&self) -> &Map<String, Value> {
        &self.decoded_body
    }

    /// True when Wit returned an `error` or `errors` payload.
    pub fn is_error(&self) -> bool {
        self.classification.is_some()
    }

    pub fn classification(&self) -> Option<&Classification> {
        self.classification.as_ref()
    }

    /// The error this response represents, if any.
    pub fn error(&self) -> Option<Error> {
        self.clone().into_result().err()
    }

    /// Returns the response, or the classified error when Wit reported one.
    pub fn into_result(self) -> Result<Self, Error> {
        let Some(classification) = self.classification.clone() else {
            return Ok(self);
        };
        let kind = classification.kind;
        let error = Box::new(ResponseError::new(classification, self));
        Err(match kind {
            ErrorKind::Authorization => Error::Authorization(error),
            ErrorKind::Api => Error::Api(error),
        })
    }
}

/// Decodes a raw response body into a mapping.
///
/// - JSON objects are used as-is.
/// - `true`/`false` become `{"success": <bool>}`.
/// - Numbers, and numeric JSON strings, become `{"id": <value>}`.
/// - Arrays become a mapping keyed by index.
/// - Invalid JSON and `null` are read as form-encoded `key=value` pairs.
/// - Anything else decodes to `{}`.
pub fn decode_body(body: &str) -> Map<String, Value> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => map,
        Ok(Value::Bool(b)) => single("success", Value::Bool(b)),
        Ok(number @ Value::Number(_)) => single("id", number),
        Ok(Value::String(s)) if is_numeric(&s) => single("id", Value::String(s)),
        Ok(Value::String(_)) => Map::new(),
        Ok(Value::Array(items)) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| (i.to_string(), item))
            .collect(),
        Ok(Value::Null) | Err(_) => parse_form(body),
    }
}

fn single(key: &str, value: Value) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    map
}

fn is_numeric(s: &str) -> bool {
    let s = s.trim();
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        && s.parse::<f64>().is_ok()
}

fn parse_form(body: &str) -> Map<String, Value> {
    body.trim()
        .split('&')
        .filter(|segment| segment.contains('='))
        .flat_map(|segment| form_urlencoded::parse(segment.as_bytes()))
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.into_owned(), Value::String(value.into_owned())))
        .collect()
}
