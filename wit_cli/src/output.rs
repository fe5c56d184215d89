use serde_json::{Map, Value};
use wit_api::{Error, WitResponse};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    /// Indented JSON.
    Pretty,
    /// Single-line JSON.
    Json,
}

pub fn print_response(resp: &WitResponse, format: &OutputFormat) {
    println!("{}", render_body(resp.decoded_body(), format));
}

pub fn print_error(err: &anyhow::Error) {
    eprintln!("{}", render_error(err));
}

fn render_body(body: &Map<String, Value>, format: &OutputFormat) -> String {
    let result = match format {
        OutputFormat::Pretty => serde_json::to_string_pretty(body),
        OutputFormat::Json => serde_json::to_string(body),
    };
    result.unwrap_or_else(|e| format!("Failed to serialize to JSON: {}", e))
}

fn render_error(err: &anyhow::Error) -> String {
    let Some(e) = err.downcast_ref::<Error>().and_then(Error::response_error) else {
        return format!("Error: {:#}", err);
    };

    let mut lines = vec![
        format!("Error: {}", err),
        format!("  status:  {}", e.http_status_code()),
        format!("  code:    {}", e.code()),
    ];
    if e.sub_error_code() != -1 {
        lines.push(format!("  subcode: {}", e.sub_error_code()));
    }
    if !e.error_type().is_empty() {
        lines.push(format!("  type:    {}", e.error_type()));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wit_api::{Headers, WitRequest};

    fn response(body: &str, status: u16) -> WitResponse {
        WitResponse::new(WitRequest::new("GET", "message"), body, status, Headers::new())
    }

    #[test]
    fn render_body_formats() {
        let resp = response(r#"{"msg_id": "abc", "n": 1}"#, 200);
        assert_eq!(
            render_body(resp.decoded_body(), &OutputFormat::Json),
            r#"{"msg_id":"abc","n":1}"#
        );
        assert_eq!(
            render_body(resp.decoded_body(), &OutputFormat::Pretty),
            "{\n  \"msg_id\": \"abc\",\n  \"n\": 1\n}"
        );
    }

    #[test]
    fn render_message_fixture() {
        let json_str = include_str!("../../wit_api/tests/fixtures/message.json");
        let resp = response(json_str, 200);
        let rendered = render_body(resp.decoded_body(), &OutputFormat::Json);
        assert!(rendered.starts_with(r#"{"msg_id":"0a1b2c3d"#));
    }

    #[test]
    fn render_authorization_error() {
        let json_str = include_str!("../../wit_api/tests/fixtures/error_no_auth.json");
        let err = anyhow::Error::from(response(json_str, 400).error().unwrap());
        assert_eq!(
            render_error(&err),
            "Error: Authorization failed: Bad auth, check token/params\n  status:  401\n  code:    no-auth"
        );
    }

    #[test]
    fn render_api_error_with_details() {
        let json_str = include_str!("../../wit_api/tests/fixtures/errors_list.json");
        let err = anyhow::Error::from(response(json_str, 422).error().unwrap());
        let rendered = render_error(&err);
        assert!(rendered.starts_with("Error: Wit API error (unknown): Invalid expression"));
        assert!(rendered.contains("  status:  422"));
        assert!(rendered.contains("  subcode: 12"));
        assert!(rendered.contains("  type:    validation"));
    }

    #[test]
    fn render_other_errors() {
        let err = anyhow::anyhow!("Invalid param 'x': expected key=value");
        assert_eq!(render_error(&err), "Error: Invalid param 'x': expected key=value");
    }
}
