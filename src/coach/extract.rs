//! Pull a JSON object out of free-form model output
//!
//! Models asked for "only JSON" still wrap it in prose or markdown fences
//! now and then. Candidates are tried in order and the first one that
//! parses as a JSON object wins.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

static JSON_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("valid json fence regex"));
static ANY_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```\s*(.*?)\s*```").expect("valid fence regex"));
static FLAT_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^{}]*\}").expect("valid flat object regex"));

/// Find the first JSON object in `text`
///
/// Tries, in order: the whole trimmed text, the body of a ```` ```json ````
/// fence, the body of any fence, then the first brace-delimited object
/// without nested braces.
pub fn extract_json_object(text: &str) -> Option<Map<String, Value>> {
    let text = text.trim();

    let candidates = [
        Some(text),
        fence_body(&JSON_FENCE, text),
        fence_body(&ANY_FENCE, text),
        FLAT_OBJECT.find(text).map(|m| m.as_str()),
    ];

    candidates
        .into_iter()
        .flatten()
        .find_map(|candidate| match serde_json::from_str::<Value>(candidate) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        })
}

fn fence_body<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text).and_then(|c| c.get(1)).map(|m| m.as_str())
}
