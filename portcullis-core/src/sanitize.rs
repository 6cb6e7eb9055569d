//! Entity escaping for untrusted text.
//!
//! Anything a user typed gets passed through here before it is rendered
//! or persisted. Escaping neutralizes markup rather than rejecting it, so
//! sanitization never fails and never loses information beyond the
//! character rewrites.

use serde_json::{Map, Value};

/// Escape markup-significant characters in untrusted text.
///
/// Replaces `&`, `<`, `>`, `"` and `'` with their HTML entity forms and
/// leaves everything else, including non-ASCII text, untouched. The
/// ampersand is rewritten first so the entities introduced by the later
/// replacements survive intact.
///
/// Already-escaped input is escaped again (`&lt;` becomes `&amp;lt;`);
/// callers are expected to sanitize exactly once at the trust boundary.
pub fn sanitize_text(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Sanitize every string entry of a JSON object map.
///
/// String values are passed through [`sanitize_text`], nested objects are
/// handled recursively, and everything else (numbers, booleans, nulls,
/// arrays) is carried over unchanged. Returns a new map; the input is not
/// mutated.
pub fn sanitize_object(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .map(|(key, value)| (key.clone(), sanitize_value(value)))
        .collect()
}

/// Recursively sanitize the strings inside an arbitrary JSON value.
pub fn sanitize_value(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(sanitize_text(s)),
        Value::Object(map) => Value::Object(sanitize_object(map)),
        other => other.clone(),
    }
}
