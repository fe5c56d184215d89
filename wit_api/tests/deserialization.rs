use serde_json::json;
use wit_api::classify::ErrorKind;
use wit_api::{decode_body, Error, ErrorCode, Headers, WitRequest, WitResponse};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

fn response(body: String, status: u16) -> WitResponse {
    WitResponse::new(WitRequest::new("GET", "message"), body, status, Headers::new())
}

#[test]
fn decode_message() {
    let resp = response(load_fixture("message.json"), 200);
    assert!(!resp.is_error());

    let body = resp.decoded_body();
    assert_eq!(body["msg_id"], "0a1b2c3d-4e5f-6789-abcd-ef0123456789");
    assert_eq!(body["_text"], "what's the weather in Paris tomorrow?");
    assert_eq!(body["entities"]["location"][0]["value"], "Paris");
    assert_eq!(body["entities"]["intent"][0]["confidence"], 0.9874);

    let keys: Vec<&str> = body.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["msg_id", "_text", "entities"]);
}

#[test]
fn decode_entity_listing() {
    let body = decode_body(&load_fixture("entities.json"));
    assert_eq!(body.len(), 4);
    assert_eq!(body["0"], "wit$location");
    assert_eq!(body["3"], "city");
}

#[test]
fn decode_token_exchange() {
    let body = decode_body(&load_fixture("token_exchange.txt"));
    assert_eq!(
        serde_json::Value::Object(body),
        json!({"access_token": "XYZ/123", "token_type": "bearer", "expires": "5183999"})
    );
}

#[test]
fn decode_scalars() {
    assert_eq!(serde_json::Value::Object(decode_body("true")), json!({"success": true}));
    assert_eq!(serde_json::Value::Object(decode_body("42")), json!({"id": 42}));
    assert_eq!(serde_json::Value::Object(decode_body("a=1&b=2")), json!({"a": "1", "b": "2"}));
    assert!(decode_body("}}} definitely not json").is_empty());
}

#[test]
fn decode_no_auth_error() {
    let resp = response(load_fixture("error_no_auth.json"), 400);
    assert!(resp.is_error());
    assert_eq!(resp.classification().unwrap().kind, ErrorKind::Authorization);

    let err = resp.error().unwrap();
    let e = match err {
        Error::Authorization(e) => e,
        other => panic!("expected Authorization, got {:?}", other),
    };
    assert_eq!(e.message(), "Bad auth, check token/params");
    assert_eq!(e.http_status_code(), 401);
    assert_eq!(e.code(), &ErrorCode::Text("no-auth".into()));
    assert_eq!(e.response().http_status_code(), 400);
}

#[test]
fn decode_errors_list_uses_last_entry() {
    let body = load_fixture("errors_list.json");
    let resp = response(body.clone(), 422);

    let e = match resp.into_result() {
        Err(Error::Api(e)) => e,
        other => panic!("expected Api error, got {:?}", other.map(|r| r.decoded_body().clone())),
    };
    assert_eq!(e.message(), "Invalid expression");
    assert!(e.code().is_unknown());
    assert_eq!(e.http_status_code(), 422);
    assert_eq!(e.sub_error_code(), 12);
    assert_eq!(e.error_type(), "validation");
    assert_eq!(e.raw_response(), body);
    assert_eq!(e.response_data()["errors"][0], "Missing value for entity 'city'");
}

#[test]
fn error_accessor_defaults() {
    let resp = response(r#"{"error": "Something broke"}"#.to_string(), 500);
    let err = resp.error().unwrap();
    let e = err.response_error().unwrap();
    assert_eq!(e.sub_error_code(), -1);
    assert_eq!(e.error_type(), "");
    assert!(e.code().is_unknown());
    assert_eq!(err.to_string(), "Wit API error (unknown): Something broke");
}
