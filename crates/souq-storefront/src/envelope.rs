//! Response envelope normalization.
//!
//! The backend wraps list responses inconsistently: a bare array,
//! `{"categories": [...]}`, `{"data": [...]}`, `{"items": [...]}`, and
//! sometimes `{"data": {"products": [...]}}`. Every list endpoint goes
//! through [`normalize_envelope`].

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Fallback keys tried after the endpoint-specific ones.
const GENERIC_KEYS: [&str; 2] = ["data", "items"];

/// Extract the record list from a response body.
///
/// Priority: bare array, then each of `keys` in order, then `data`, then
/// `items`. A key holding an object is searched one level down with the
/// same priority. Anything else yields an empty list.
pub fn normalize_envelope(body: Value, keys: &[&str]) -> Vec<Value> {
    extract(body, keys, 0)
}

fn extract(body: Value, keys: &[&str], depth: u8) -> Vec<Value> {
    let mut map = match body {
        Value::Array(items) => return items,
        Value::Object(map) => map,
        _ => return Vec::new(),
    };
    for key in keys.iter().chain(GENERIC_KEYS.iter()) {
        match map.remove(*key) {
            Some(Value::Array(items)) => return items,
            Some(nested @ Value::Object(_)) if depth == 0 => {
                let items = extract(nested, keys, depth + 1);
                if !items.is_empty() {
                    return items;
                }
            }
            _ => {}
        }
    }
    Vec::new()
}

/// Decode each record, skipping (and logging) those that don't fit `T`.
pub fn decode_records<T: DeserializeOwned>(records: Vec<Value>, what: &str) -> Vec<T> {
    let total = records.len();
    let decoded: Vec<T> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(what, index, error = %err, "skipping malformed record");
                None
            }
        })
        .collect();
    if decoded.len() < total {
        tracing::warn!(what, kept = decoded.len(), total, "dropped malformed records");
    }
    decoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_array() {
        assert_eq!(normalize_envelope(json!([1, 2]), &["categories"]).len(), 2);
    }

    #[test]
    fn test_named_key_wins_over_data() {
        let body = json!({ "categories": [1], "data": [1, 2, 3] });
        assert_eq!(normalize_envelope(body, &["categories"]), vec![json!(1)]);
    }

    #[test]
    fn test_data_then_items() {
        assert_eq!(normalize_envelope(json!({ "data": [1, 2] }), &["stores"]).len(), 2);
        assert_eq!(normalize_envelope(json!({ "items": [1] }), &["stores"]).len(), 1);
    }

    #[test]
    fn test_nested_object() {
        let body = json!({ "data": { "products": [1, 2, 3] } });
        assert_eq!(normalize_envelope(body, &["products"]).len(), 3);
    }

    #[test]
    fn test_unknown_shapes_are_empty() {
        assert!(normalize_envelope(json!({ "message": "ok" }), &["stores"]).is_empty());
        assert!(normalize_envelope(json!("oops"), &["stores"]).is_empty());
        assert!(normalize_envelope(Value::Null, &["stores"]).is_empty());
        assert!(normalize_envelope(json!({ "data": null }), &["stores"]).is_empty());
    }

    #[test]
    fn test_decode_records_skips_bad_rows() {
        let decoded: Vec<u32> = decode_records(vec![json!(1), json!("x"), json!(3)], "numbers");
        assert_eq!(decoded, vec![1, 3]);
    }
}
