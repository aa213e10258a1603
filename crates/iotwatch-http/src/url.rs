//! URL construction helpers.
//!
//! Paths are joined onto the configured base by string concatenation rather
//! than `Url::join`, so a base like `http://host/api` keeps its `/api`
//! segment.

use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::TransportError;

/// Resolve `path` against `base` and append `query` pairs.
///
/// An absolute `http(s)://` path bypasses the base.
pub fn build_url(
    base: &str,
    path: &str,
    query: &[(String, String)],
) -> Result<Url, TransportError> {
    let mut url = if path.starts_with("http://") || path.starts_with("https://") {
        Url::parse(path)?
    } else {
        let base = base.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Url::parse(&format!("{base}/{path}"))?
    };

    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    Ok(url)
}

/// Flatten a serializable struct into query pairs.
///
/// `None` fields are omitted, sequences repeat the key, and nested objects
/// are rejected.
pub fn query_pairs<Q: Serialize + ?Sized>(
    query: &Q,
) -> Result<Vec<(String, String)>, TransportError> {
    let value = serde_json::to_value(query)
        .map_err(|e| TransportError::InvalidRequest(format!("cannot encode query: {e}")))?;

    let map = match value {
        Value::Object(map) => map,
        Value::Null => return Ok(Vec::new()),
        other => {
            return Err(TransportError::InvalidRequest(format!(
                "query must be a struct or map, got {other}"
            )));
        }
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            Value::Array(items) => {
                for item in items {
                    if let Some(text) = scalar(&key, item)? {
                        pairs.push((key.clone(), text));
                    }
                }
            }
            other => {
                if let Some(text) = scalar(&key, other)? {
                    pairs.push((key, text));
                }
            }
        }
    }
    Ok(pairs)
}

fn scalar(key: &str, value: Value) -> Result<Option<String>, TransportError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Array(_) | Value::Object(_) => Err(TransportError::InvalidRequest(format!(
            "query parameter '{key}' is not a scalar"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BASE: &str = "http://localhost:8000/api";

    #[test]
    fn test_build_url_keeps_base_path() {
        let url = build_url(BASE, "/devices/3", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/devices/3");

        let url = build_url("http://localhost:8000/api/", "sensors/", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/sensors/");
    }

    #[test]
    fn test_build_url_appends_query() {
        let query = vec![
            ("status".to_string(), "active".to_string()),
            ("limit".to_string(), "10".to_string()),
        ];
        let url = build_url(BASE, "/alarms", &query).unwrap();
        assert_eq!(url.query(), Some("status=active&limit=10"));
    }

    #[test]
    fn test_build_url_absolute_path_bypasses_base() {
        let url = build_url(BASE, "https://other.example.com/health", &[]).unwrap();
        assert_eq!(url.as_str(), "https://other.example.com/health");
    }

    #[test]
    fn test_build_url_rejects_invalid_base() {
        let err = build_url("not a base", "/devices", &[]).unwrap_err();
        assert!(matches!(err, TransportError::InvalidUrl(_)));
    }

    #[test]
    fn test_query_pairs_omits_nulls() {
        let pairs = query_pairs(&json!({"status": "active", "limit": 5, "offset": null})).unwrap();
        assert!(pairs.contains(&("status".to_string(), "active".to_string())));
        assert!(pairs.contains(&("limit".to_string(), "5".to_string())));
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn test_query_pairs_repeats_sequence_keys() {
        let pairs = query_pairs(&json!({"id": [1, 2]})).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("id".to_string(), "1".to_string()),
                ("id".to_string(), "2".to_string())
            ]
        );
    }

    #[test]
    fn test_query_pairs_rejects_nested_objects() {
        let err = query_pairs(&json!({"filter": {"a": 1}})).unwrap_err();
        assert!(matches!(err, TransportError::InvalidRequest(_)));
    }

    #[test]
    fn test_query_pairs_rejects_non_struct() {
        assert!(query_pairs(&json!(42)).is_err());
        assert!(query_pairs(&()).unwrap().is_empty());
    }
}
