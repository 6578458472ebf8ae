//! Field decoders for loosely typed backend JSON.
//!
//! The marketplace API is not consistent about scalar types: ratings show up
//! as `4.5` or `"4.5"`, flags as `1`, `true` or `"available"`. These helpers
//! accept any scalar and never fail; unusable values become `None`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Any scalar rendered as a string; `null`, empty strings and containers become `None`.
pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// A number or numeric string.
pub fn float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    })
}

/// A non-negative integer, a numeric string, or an integral float.
pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    Ok(float(deserializer)?
        .filter(|v| *v >= 0.0)
        .map(|v| v.round() as u64))
}

/// A list of strings, or a single string treated as a one-element list.
pub fn string_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                Value::Object(map) => map
                    .get("name")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                _ => None,
            })
            .collect(),
        Value::String(s) if !s.is_empty() => vec![s],
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "string")]
        label: Option<String>,
        #[serde(default, deserialize_with = "float")]
        rating: Option<f64>,
        #[serde(default, deserialize_with = "count")]
        raters: Option<u64>,
        #[serde(default, deserialize_with = "string_list")]
        tags: Vec<String>,
    }

    #[test]
    fn test_scalars() {
        let p: Sample = serde_json::from_value(json!({
            "label": 3,
            "rating": "4.5",
            "raters": 12.0,
            "tags": ["a", {"name": "b"}, 7]
        }))
        .unwrap();
        assert_eq!(p.label.as_deref(), Some("3"));
        assert_eq!(p.rating, Some(4.5));
        assert_eq!(p.raters, Some(12));
        assert_eq!(p.tags, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_unusable_values_are_none() {
        let p: Sample = serde_json::from_value(json!({
            "label": "  ",
            "rating": "n/a",
            "raters": -3,
            "tags": null
        }))
        .unwrap();
        assert!(p.label.is_none());
        assert!(p.rating.is_none());
        assert!(p.raters.is_none());
        assert!(p.tags.is_empty());
    }

    #[test]
    fn test_missing_fields() {
        let p: Sample = serde_json::from_value(json!({})).unwrap();
        assert!(p.label.is_none());
        assert!(p.tags.is_empty());
    }
}
