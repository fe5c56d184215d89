//! Parsing of `--param key=value` and `--json` arguments into request params.

use anyhow::{anyhow, bail, Result};
use serde_json::Value;
use wit_api::Params;

/// Parses `key=value` pairs. A value that is valid JSON (number, boolean,
/// array, object, quoted string) keeps its type; anything else is a string.
pub fn parse_params(pairs: &[String]) -> Result<Params> {
    let mut params = Params::new();
    for pair in pairs {
        let (key, raw) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("Invalid param '{}': expected key=value", pair))?;
        let key = key.trim();
        if key.is_empty() {
            bail!("Invalid param '{}': key is empty", pair);
        }
        let value = serde_json::from_str::<Value>(raw)
            .ok()
            .filter(|v| !v.is_null())
            .unwrap_or_else(|| Value::String(raw.to_string()));
        params.insert(key.to_string(), value);
    }
    Ok(params)
}

/// Parses a JSON object given with `--json`.
pub fn parse_json_object(raw: &str) -> Result<Params> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Object(map) => Ok(map),
        _ => bail!("--json must be a JSON object"),
    }
}
