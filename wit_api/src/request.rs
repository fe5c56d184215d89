//! A single Wit API call: method, endpoint, parameters, headers, and version.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::{
    query::{append_params_to_url, force_slash_prefix, Params},
    Error,
};

/// Wit API version sent with every request unless overridden.
pub const DEFAULT_WIT_VERSION: &str = "20141022";

/// Name reported in the `User-Agent` header.
pub const SDK_NAME: &str = "wit-rust";

/// Version of this crate, reported in the `User-Agent` header.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Header name to value. Setting an existing name replaces its value;
/// names match case-insensitively when merged.
pub type Headers = BTreeMap<String, String>;

/// Inserts `incoming` into `headers`, dropping any existing entry whose name
/// differs only in case.
pub(crate) fn merge_headers(
    headers: &mut Headers,
    incoming: impl IntoIterator<Item = (String, String)>,
) {
    for (name, value) in incoming {
        headers.retain(|existing, _| !existing.eq_ignore_ascii_case(&name));
        headers.insert(name, value);
    }
}

/// HTTP methods the Wit API accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "" => Err(Error::Validation("HTTP method not specified.".to_string())),
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "DELETE" => Ok(Method::Delete),
            _ => Err(Error::Validation("Invalid HTTP method specified.".to_string())),
        }
    }
}

/// Parameters for one call to Wit.
///
/// The method is stored as given (upper-cased) and only checked when the URL
/// is rendered, so an unsupported method fails before any network traffic.
#[derive(Debug, Clone)]
pub struct WitRequest {
    access_token: Option<String>,
    method: String,
    endpoint: String,
    headers: Headers,
    params: Params,
    version: String,
}

impl WitRequest {
    /// Creates a request for `endpoint` using the default API version.
    pub fn new(method: &str, endpoint: &str) -> Self {
        Self {
            access_token: None,
            method: method.to_uppercase(),
            endpoint: endpoint.to_string(),
            headers: Headers::new(),
            params: Params::new(),
            version: DEFAULT_WIT_VERSION.to_string(),
        }
    }

    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }

    /// Merges `params` into the request; new values replace existing keys.
    pub fn with_params(mut self, params: Params) -> Self {
        self.set_params(params);
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.set_headers(headers);
        self
    }

    /// Pins the API version. An empty version keeps the default.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        let version = version.into();
        if !version.is_empty() {
            self.version = version;
        }
        self
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn set_access_token(&mut self, access_token: impl Into<String>) {
        self.access_token = Some(access_token.into());
    }

    /// The method as given, upper-cased. May be unsupported; see [`Self::validate_method`].
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn set_method(&mut self, method: &str) {
        self.method = method.to_uppercase();
    }

    /// Checks that a supported method is set.
    pub fn validate_method(&self) -> Result<Method, Error> {
        self.method.parse()
    }

    /// The endpoint as given. Empty for batch-style calls.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn set_endpoint(&mut self, endpoint: &str) {
        self.endpoint = endpoint.to_string();
    }

    /// Headers to send: the defaults, overridden by any set on this request.
    pub fn headers(&self) -> Headers {
        let mut headers = Self::default_headers();
        merge_headers(&mut headers, self.headers.clone());
        headers
    }

    /// Merges `headers` into the request; new values replace existing names.
    pub fn set_headers(&mut self, headers: Headers) {
        merge_headers(&mut self.headers, headers);
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn set_params(&mut self, params: Params) {
        self.params.extend(params);
    }

    /// Parameters that travel in the JSON body: all of them for POST, none otherwise.
    pub fn post_params(&self) -> Params {
        if self.method == Method::Post.as_str() {
            self.params.clone()
        } else {
            Params::new()
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Renders the path and query string for this request.
    ///
    /// POST requests carry only `v` in the query; other methods carry every
    /// parameter plus `v`.
    pub fn url(&self) -> Result<String, Error> {
        let method = self.validate_method()?;
        let path = force_slash_prefix(Some(self.endpoint.as_str())).unwrap_or_default();

        let mut params = match method {
            Method::Post => Params::new(),
            Method::Get | Method::Delete => self.params.clone(),
        };
        params.insert("v".to_string(), self.version.clone().into());

        Ok(append_params_to_url(&path, &params))
    }

    /// Headers sent with every request.
    pub fn default_headers() -> Headers {
        Headers::from([
            (
                "User-Agent".to_string(),
                format!("{}-{}", SDK_NAME, SDK_VERSION),
            ),
            ("Accept-Encoding".to_string(), "*".to_string()),
        ])
    }
}
