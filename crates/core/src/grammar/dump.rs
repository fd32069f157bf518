//! JSON serialization helpers.

/// Serialize any serde-serializable value to pretty-printed JSON.
pub fn to_pretty_json<T: serde::Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}
