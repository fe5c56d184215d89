//! The [`Wit`] facade: default credentials plus `get`/`post`/`delete`.

use std::sync::{Mutex, PoisonError};

use crate::{
    client::WitClient,
    config::WitConfig,
    query::Params,
    request::WitRequest,
    response::WitResponse,
    transport::create_transport,
    Error,
};

/// Entry point for talking to Wit with a default access token and API version.
///
/// Safe to share between tasks: the last-response slot is behind a mutex and
/// the client's call counter is atomic.
#[derive(Debug)]
pub struct Wit {
    client: WitClient,
    default_access_token: String,
    default_wit_version: String,
    last_response: Mutex<Option<WitResponse>>,
}

impl Wit {
    /// Builds the facade. Fails when no access token is configured or the
    /// transport cannot be created.
    pub fn new(config: WitConfig) -> Result<Self, Error> {
        let default_access_token = config
            .default_access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                Error::Configuration(
                    "You forgot to set your token with param \"default_access_token\".".to_string(),
                )
            })?;

        let transport = create_transport(&config.http_client_handler)?;
        let client = WitClient::new(transport)
            .with_base_url(&config.base_url)
            .with_timeout(config.timeout);

        Ok(Self {
            client,
            default_access_token,
            default_wit_version: config.default_wit_version,
            last_response: Mutex::new(None),
        })
    }

    pub fn client(&self) -> &WitClient {
        &self.client
    }

    pub fn default_access_token(&self) -> &str {
        &self.default_access_token
    }

    pub fn default_wit_version(&self) -> &str {
        &self.default_wit_version
    }

    /// Sends a GET request to `endpoint`.
    pub async fn get(&self, endpoint: &str) -> Result<WitResponse, Error> {
        self.send_request("GET", endpoint, Params::new()).await
    }

    /// Sends a POST request to `endpoint` with `params` as the JSON body.
    pub async fn post(&self, endpoint: &str, params: Params) -> Result<WitResponse, Error> {
        self.send_request("POST", endpoint, params).await
    }

    /// Sends a DELETE request to `endpoint` with `params` in the query string.
    pub async fn delete(&self, endpoint: &str, params: Params) -> Result<WitResponse, Error> {
        self.send_request("DELETE", endpoint, params).await
    }

    /// Sends a request and records it as the last response on success.
    pub async fn send_request(
        &self,
        method: &str,
        endpoint: &str,
        params: Params,
    ) -> Result<WitResponse, Error> {
        let request = self.request(method, endpoint, params);
        let response = self.client.send_request(request).await?;

        *self
            .last_response
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(response.clone());

        Ok(response)
    }

    /// Builds a request carrying the default token and version.
    pub fn request(&self, method: &str, endpoint: &str, params: Params) -> WitRequest {
        WitRequest::new(method, endpoint)
            .with_access_token(self.default_access_token.as_str())
            .with_params(params)
            .with_version(self.default_wit_version.as_str())
    }

    /// The last successful response, if any call has succeeded yet.
    pub fn last_response(&self) -> Option<WitResponse> {
        self.last_response
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
