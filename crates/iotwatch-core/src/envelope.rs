//! Response envelope normalization.
//!
//! The platform API wraps most payloads as
//! `{ success, data?, message?, error?, pagination? }`, but some endpoints
//! (login, registration) answer with a bare JSON object and rely on the HTTP
//! status alone. [`ResponseBody`] names the three shapes a 2xx body can take
//! and [`normalize`] folds all of them into one [`Envelope`], so code past the
//! boundary never inspects raw JSON.
//!
//! # Normalization rule
//!
//! - `success: false` is a business failure.
//! - `success: true`, or no boolean `success` field at all, is success.
//! - For bare bodies the whole body is the payload.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Pagination metadata attached to list responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    pub pages: u32,
    pub total: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

/// The shapes a successful-status response body can take on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// No body (e.g. `204 No Content`).
    Empty,
    /// An object carrying a boolean `success` field.
    Enveloped(Map<String, Value>),
    /// Anything else; the HTTP status is the only success signal.
    Bare(Value),
}

impl ResponseBody {
    /// Tag a decoded body by shape.
    pub fn classify(body: Option<Value>) -> Self {
        match body {
            None | Some(Value::Null) => Self::Empty,
            Some(Value::Object(map)) if map.get("success").is_some_and(Value::is_boolean) => {
                Self::Enveloped(map)
            }
            Some(other) => Self::Bare(other),
        }
    }
}

/// The one shape every backend response is normalized to.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Envelope {
    pub success: bool,
    pub data: Option<Value>,
    pub message: Option<String>,
    pub error: Option<String>,
    pub pagination: Option<Pagination>,
}

impl Envelope {
    /// A successful envelope carrying `data`.
    pub const fn ok(data: Option<Value>) -> Self {
        Self {
            success: true,
            data,
            message: None,
            error: None,
            pagination: None,
        }
    }

    /// The message a server supplied, preferring `message` over `error`.
    pub fn server_message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .or_else(|| self.error.as_deref().filter(|e| !e.trim().is_empty()))
    }

    /// Decode the payload into `T`.
    ///
    /// A missing payload decodes as JSON `null`, so `()` and `Option<_>`
    /// targets accept empty responses.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.data.unwrap_or(Value::Null))
    }

    /// Decode a list payload together with its pagination metadata.
    pub fn decode_page<T: DeserializeOwned>(self) -> Result<Page<T>, serde_json::Error> {
        let pagination = self.pagination;
        let items = match self.data {
            None | Some(Value::Null) => Vec::new(),
            Some(value) => serde_json::from_value(value)?,
        };
        Ok(Page { items, pagination })
    }
}

/// A page of list results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Option<Pagination>,
}

impl<T> Page<T> {
    /// Whether the server reports a following page.
    pub fn has_next(&self) -> bool {
        self.pagination.is_some_and(|p| p.has_next)
    }
}

/// Fold any 2xx body into an [`Envelope`].
pub fn normalize(body: Option<Value>) -> Envelope {
    match ResponseBody::classify(body) {
        ResponseBody::Empty => Envelope::ok(None),
        ResponseBody::Bare(value) => Envelope::ok(Some(value)),
        ResponseBody::Enveloped(mut map) => {
            let success = map
                .get("success")
                .and_then(Value::as_bool)
                .unwrap_or(true);
            let data = map.remove("data").filter(|v| !v.is_null());
            let pagination = map
                .remove("pagination")
                .and_then(|v| serde_json::from_value(v).ok());
            Envelope {
                success,
                data,
                message: take_string(&mut map, "message"),
                error: take_string(&mut map, "error"),
                pagination,
            }
        }
    }
}

/// Pull a message-like field out of an error body of any shape.
///
/// Used for non-2xx responses, where the body may or may not be an envelope.
pub fn error_message(body: Option<&Value>) -> Option<String> {
    match body? {
        Value::Object(map) => ["message", "error", "detail"]
            .iter()
            .filter_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .find(|m| !m.is_empty())
            .map(ToString::to_string),
        Value::String(text) => {
            let text = text.trim();
            (!text.is_empty() && text.len() <= 200).then(|| text.to_string())
        }
        _ => None,
    }
}

fn take_string(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    match map.remove(key)? {
        Value::String(s) => Some(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_shapes() {
        assert_eq!(ResponseBody::classify(None), ResponseBody::Empty);
        assert_eq!(ResponseBody::classify(Some(Value::Null)), ResponseBody::Empty);
        assert!(matches!(
            ResponseBody::classify(Some(json!({"success": true}))),
            ResponseBody::Enveloped(_)
        ));
        assert!(matches!(
            ResponseBody::classify(Some(json!({"access_token": "t"}))),
            ResponseBody::Bare(_)
        ));
        // A non-boolean success field is not an envelope marker.
        assert!(matches!(
            ResponseBody::classify(Some(json!({"success": "yes"}))),
            ResponseBody::Bare(_)
        ));
        assert!(matches!(
            ResponseBody::classify(Some(json!([1, 2]))),
            ResponseBody::Bare(_)
        ));
    }

    #[test]
    fn test_normalize_success_envelope_unwraps_data() {
        let env = normalize(Some(json!({"success": true, "data": {"id": 1}})));
        assert!(env.success);
        assert_eq!(env.data, Some(json!({"id": 1})));
        assert!(env.server_message().is_none());
    }

    #[test]
    fn test_normalize_failure_envelope() {
        let env = normalize(Some(json!({"success": false, "message": "invalid input"})));
        assert!(!env.success);
        assert_eq!(env.server_message(), Some("invalid input"));
    }

    #[test]
    fn test_server_message_falls_back_to_error_field() {
        let env = normalize(Some(
            json!({"success": false, "message": "", "error": "duplicate name"}),
        ));
        assert_eq!(env.server_message(), Some("duplicate name"));
    }

    #[test]
    fn test_normalize_bare_body_is_implicit_success() {
        let body = json!({"access_token": "abc", "user": {"id": 3}});
        let env = normalize(Some(body.clone()));
        assert!(env.success);
        assert_eq!(env.data, Some(body));
    }

    #[test]
    fn test_normalize_empty_body() {
        let env = normalize(None);
        assert!(env.success);
        assert!(env.data.is_none());
        env.decode::<()>().unwrap();
    }

    #[test]
    fn test_normalize_keeps_pagination() {
        let env = normalize(Some(json!({
            "success": true,
            "data": [{"id": 1}, {"id": 2}],
            "pagination": {
                "page": 1, "per_page": 2, "pages": 3, "total": 6,
                "has_next": true, "has_prev": false
            }
        })));
        let page: Page<Value> = env.decode_page().unwrap();
        assert_eq!(page.items.len(), 2);
        assert!(page.has_next());
        assert_eq!(page.pagination.unwrap().total, 6);
    }

    #[test]
    fn test_malformed_pagination_is_dropped() {
        let env = normalize(Some(
            json!({"success": true, "data": [], "pagination": "nope"}),
        ));
        assert!(env.pagination.is_none());
    }

    #[test]
    fn test_decode_page_without_data() {
        let page: Page<Value> = Envelope::ok(None).decode_page().unwrap();
        assert!(page.items.is_empty());
        assert!(!page.has_next());
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(Some(&json!({"message": "nope"}))),
            Some("nope".to_string())
        );
        assert_eq!(
            error_message(Some(&json!({"error": "bad token"}))),
            Some("bad token".to_string())
        );
        assert_eq!(
            error_message(Some(&json!({"detail": "Not authenticated"}))),
            Some("Not authenticated".to_string())
        );
        assert_eq!(error_message(Some(&json!({"code": 7}))), None);
        assert_eq!(
            error_message(Some(&json!("Bad Gateway"))),
            Some("Bad Gateway".to_string())
        );
        assert_eq!(error_message(None), None);
    }

    #[test]
    fn test_error_message_ignores_html_pages() {
        let page = "<html>".to_string() + &"x".repeat(500) + "</html>";
        assert_eq!(error_message(Some(&Value::String(page))), None);
    }
}
