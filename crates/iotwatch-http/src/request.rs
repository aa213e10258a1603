//! Caller-side description of an API call.

use serde::Serialize;
use serde_json::Value;

use crate::http::HttpMethod;
use crate::url::query_pairs;

/// Method, path, optional JSON body and optional query of one call.
///
/// Encoding problems are recorded rather than returned, so builders chain
/// freely; the client rejects such a request with `InvalidRequest` before
/// anything is sent.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub(crate) method: HttpMethod,
    pub(crate) path: String,
    pub(crate) body: Option<Value>,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) encode_error: Option<String>,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: Vec::new(),
            encode_error: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => self.body = Some(value),
            Err(e) => self.record_error(format!("cannot encode body: {e}")),
        }
        self
    }

    /// Append query parameters flattened from a serializable struct.
    #[must_use]
    pub fn query<Q: Serialize + ?Sized>(mut self, query: &Q) -> Self {
        match query_pairs(query) {
            Ok(pairs) => self.query.extend(pairs),
            Err(e) => self.record_error(e.to_string()),
        }
        self
    }

    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn record_error(&mut self, message: String) {
        if self.encode_error.is_none() {
            self.encode_error = Some(message);
        }
    }
}
