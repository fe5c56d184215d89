//! Query-string helpers: merging parameters into a URL and normalising endpoint paths.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use url::form_urlencoded;

/// Request parameters, keyed by name. Values may be scalars, arrays, or objects.
pub type Params = Map<String, Value>;

/// Pairs belonging to one top-level key, in the order they are encoded.
type Group = Vec<(String, String)>;

/// Appends `new_params` to `url`, returning the new URL.
///
/// Parameters already present in `url` win over `new_params` on a key
/// collision. The resulting query is always sorted by key so the same
/// inputs render the same URL.
pub fn append_params_to_url(url: &str, new_params: &Params) -> String {
    if new_params.is_empty() {
        return url.to_string();
    }

    let mut groups = group_params(new_params);
    let path = match url.split_once('?') {
        None => url,
        Some((path, query)) => {
            groups.extend(parse_query(query));
            path
        }
    };

    format!("{}?{}", path, encode(&groups))
}

/// Prefixes `path` with `/` unless it already starts with one. Empty and
/// missing paths are returned unchanged.
pub fn force_slash_prefix(path: Option<&str>) -> Option<String> {
    match path {
        None => None,
        Some(p) if p.is_empty() || p.starts_with('/') => Some(p.to_string()),
        Some(p) => Some(format!("/{}", p)),
    }
}

/// Encodes `params` as a form query string, sorted by key.
pub fn build_query(params: &Params) -> String {
    encode(&group_params(params))
}

fn group_params(params: &Params) -> BTreeMap<String, Group> {
    params
        .iter()
        .map(|(key, value)| {
            let mut pairs = Vec::new();
            flatten(key, value, &mut pairs);
            (key.clone(), pairs)
        })
        .collect()
}

fn flatten(key: &str, value: &Value, out: &mut Group) {
    match value {
        Value::Null => {}
        Value::Bool(b) => out.push((key.to_string(), if *b { "1" } else { "0" }.to_string())),
        Value::Number(n) => out.push((key.to_string(), n.to_string())),
        Value::String(s) => out.push((key.to_string(), s.clone())),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten(&format!("{}[{}]", key, i), item, out);
            }
        }
        Value::Object(map) => {
            for (sub, item) in map {
                flatten(&format!("{}[{}]", key, sub), item, out);
            }
        }
    }
}

fn parse_query(query: &str) -> BTreeMap<String, Group> {
    let mut groups: BTreeMap<String, Group> = BTreeMap::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let top = top_level_key(&key).to_string();
        let group = groups.entry(top).or_default();
        // A repeated plain key replaces the earlier value; `key[]` accumulates.
        match group
            .iter_mut()
            .find(|(existing, _)| *existing == key && !key.ends_with("[]"))
        {
            Some(slot) => slot.1 = value.into_owned(),
            None => group.push((key.into_owned(), value.into_owned())),
        }
    }
    groups
}

fn top_level_key(key: &str) -> &str {
    match key.find('[') {
        Some(0) | None => key,
        Some(i) => &key[..i],
    }
}

fn encode(groups: &BTreeMap<String, Group>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in groups.values().flatten() {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}
