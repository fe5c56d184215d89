//! Typed client for the Wit.ai HTTP API.
//!
//! [`Wit`] holds the default token and API version and sends requests through
//! a [`WitClient`], which renders each [`WitRequest`], hands it to a pluggable
//! [`Transport`], and decodes the result into a [`WitResponse`]. Error payloads
//! from Wit come back as [`Error::Authorization`] or [`Error::Api`].

pub mod classify;
mod client;
mod config;
mod errors;
pub mod query;
mod request;
mod response;
pub mod transport;
mod wit;
pub use self::client::{PreparedRequest, WitClient, BASE_WIT_URL, DEFAULT_REQUEST_TIMEOUT};
pub use self::config::{
    WitConfig, ENV_ACCESS_TOKEN, ENV_API_VERSION, ENV_BASE_URL, ENV_HTTP_CLIENT, ENV_TIMEOUT_SECS,
};
pub use self::errors::{Error, ErrorCode, ResponseError, TransportError};
pub use self::query::Params;
pub use self::request::{Headers, Method, WitRequest, DEFAULT_WIT_VERSION, SDK_NAME, SDK_VERSION};
pub use self::response::{decode_body, WitResponse};
pub use self::transport::{
    create_transport, HttpClientHandler, RawResponse, ReqwestTransport, Transport,
};
pub use self::wit::Wit;
