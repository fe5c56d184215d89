//! Configuration for the [`Wit`](crate::Wit) facade.

use std::time::Duration;

use crate::{
    client::{BASE_WIT_URL, DEFAULT_REQUEST_TIMEOUT},
    request::DEFAULT_WIT_VERSION,
    transport::HttpClientHandler,
    Error,
};

/// Environment variable holding the access token.
pub const ENV_ACCESS_TOKEN: &str = "WIT_ACCESS_TOKEN";
/// Environment variable overriding the API version.
pub const ENV_API_VERSION: &str = "WIT_API_VERSION";
/// Environment variable selecting the transport (`auto` or `reqwest`).
pub const ENV_HTTP_CLIENT: &str = "WIT_HTTP_CLIENT";
/// Environment variable overriding the API host.
pub const ENV_BASE_URL: &str = "WIT_BASE_URL";
/// Environment variable overriding the request timeout, in seconds.
pub const ENV_TIMEOUT_SECS: &str = "WIT_TIMEOUT_SECS";

/// Settings used to build a [`Wit`](crate::Wit) instance.
#[derive(Debug, Clone)]
pub struct WitConfig {
    /// Sent as the bearer token on every request. Required.
    pub default_access_token: Option<String>,
    pub default_wit_version: String,
    pub http_client_handler: HttpClientHandler,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for WitConfig {
    fn default() -> Self {
        Self {
            default_access_token: None,
            default_wit_version: DEFAULT_WIT_VERSION.to_string(),
            http_client_handler: HttpClientHandler::Auto,
            base_url: BASE_WIT_URL.to_string(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl WitConfig {
    /// Configuration with `access_token` and defaults for everything else.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            default_access_token: Some(access_token.into()),
            ..Self::default()
        }
    }

    pub fn with_wit_version(mut self, version: impl Into<String>) -> Self {
        self.default_wit_version = version.into();
        self
    }

    pub fn with_http_client_handler(mut self, handler: HttpClientHandler) -> Self {
        self.http_client_handler = handler;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reads configuration from `WIT_*` environment variables. Unset
    /// variables keep their defaults; a missing token is reported later by
    /// [`Wit::new`](crate::Wit::new).
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        config.default_access_token = get(ENV_ACCESS_TOKEN);
        if let Some(version) = get(ENV_API_VERSION) {
            config.default_wit_version = version;
        }
        if let Some(handler) = get(ENV_HTTP_CLIENT) {
            config.http_client_handler = handler.parse()?;
        }
        if let Some(base_url) = get(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(secs) = get(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                Error::Configuration(format!("{} must be a whole number of seconds", ENV_TIMEOUT_SECS))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
