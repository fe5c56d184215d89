use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use wit_api::{
    Error, Headers, HttpClientHandler, Method, Params, RawResponse, Transport, TransportError,
    Wit, WitConfig,
};

#[derive(Debug, Clone)]
struct Sent {
    url: String,
    method: Method,
    body: String,
    headers: Headers,
    timeout: Duration,
}

/// Records every call and answers with a fixed response.
#[derive(Debug)]
struct Recording {
    status: u16,
    body: &'static str,
    sent: Mutex<Vec<Sent>>,
}

impl Recording {
    fn new(status: u16, body: &'static str) -> Arc<Self> {
        Arc::new(Self {
            status,
            body,
            sent: Mutex::new(Vec::new()),
        })
    }

    fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for Recording {
    async fn send(
        &self,
        url: &str,
        method: Method,
        body: &str,
        headers: &Headers,
        timeout: Duration,
    ) -> Result<RawResponse, TransportError> {
        self.sent.lock().unwrap().push(Sent {
            url: url.to_string(),
            method,
            body: body.to_string(),
            headers: headers.clone(),
            timeout,
        });
        Ok(RawResponse::new(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json",
            self.body,
            self.status,
        ))
    }
}

#[derive(Debug)]
struct Failing;

#[async_trait]
impl Transport for Failing {
    async fn send(
        &self,
        _url: &str,
        _method: Method,
        _body: &str,
        _headers: &Headers,
        timeout: Duration,
    ) -> Result<RawResponse, TransportError> {
        Err(TransportError::Timeout(timeout))
    }
}

fn wit_with(transport: Arc<dyn Transport>, config: WitConfig) -> Wit {
    Wit::new(config.with_http_client_handler(HttpClientHandler::Custom(transport))).unwrap()
}

#[tokio::test]
async fn custom_transport_sees_rendered_request() {
    let transport = Recording::new(200, r#"{"msg_id": "1"}"#);
    let wit = wit_with(transport.clone(), WitConfig::new("secret"));

    wit.send_request("post", "/message", json!({"q": "hi"}).as_object().cloned().unwrap())
        .await
        .unwrap();

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    let call = &sent[0];
    assert_eq!(call.url, "https://api.wit.ai/message?v=20141022");
    assert_eq!(call.method, Method::Post);
    assert_eq!(call.body, r#"{"q":"hi"}"#);
    assert_eq!(call.timeout, Duration::from_secs(60));
    assert_eq!(call.headers["Authorization"], "Bearer secret");
    assert_eq!(call.headers["Content-Type"], "application/json");
    assert_eq!(call.headers["Accept-Encoding"], "*");
    assert!(call.headers["User-Agent"].starts_with("wit-rust-"));
}

#[tokio::test]
async fn configured_timeout_reaches_transport() {
    let transport = Recording::new(200, "{}");
    let wit = wit_with(
        transport.clone(),
        WitConfig::new("secret").with_timeout(Duration::from_secs(5)),
    );

    wit.get("apps").await.unwrap();
    assert_eq!(transport.sent()[0].timeout, Duration::from_secs(5));
}

#[tokio::test]
async fn raw_header_block_is_parsed() {
    let transport = Recording::new(200, "{}");
    let wit = wit_with(transport, WitConfig::new("secret"));

    let resp = wit.get("apps").await.unwrap();
    assert_eq!(resp.headers().len(), 1);
    assert_eq!(resp.headers()["content-type"], "application/json");
    assert!(!resp.headers().contains_key("Content-Type"));
}

#[tokio::test]
async fn transport_errors_propagate_unchanged() {
    let wit = wit_with(Arc::new(Failing), WitConfig::new("secret"));

    let err = wit.get("apps").await.unwrap_err();
    assert!(matches!(
        err,
        Error::Transport(TransportError::Timeout(t)) if t == Duration::from_secs(60)
    ));
    assert_eq!(wit.client().request_count(), 0);
    assert!(wit.last_response().is_none());
}

#[tokio::test]
async fn counter_is_shared_across_tasks() {
    let transport = Recording::new(400, r#"{"error": "nope", "code": "bad-request"}"#);
    let wit = Arc::new(wit_with(transport.clone(), WitConfig::new("secret")));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let wit = Arc::clone(&wit);
            tokio::spawn(async move { wit.get(&format!("apps/{}", i)).await })
        })
        .collect();

    for handle in handles {
        assert!(matches!(handle.await.unwrap(), Err(Error::Api(_))));
    }

    assert_eq!(wit.client().request_count(), 8);
    assert_eq!(transport.sent().len(), 8);
}

#[tokio::test]
async fn empty_get_body_is_empty_object() {
    let transport = Recording::new(200, "{}");
    let wit = wit_with(transport.clone(), WitConfig::new("secret"));

    wit.send_request("GET", "", Params::new()).await.unwrap();
    let call = &transport.sent()[0];
    assert_eq!(call.url, "https://api.wit.ai?v=20141022");
    assert_eq!(call.body, "{}");
}
