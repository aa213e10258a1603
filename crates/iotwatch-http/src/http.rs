//! HTTP backend abstraction.
//!
//! The pipeline talks to the network only through [`HttpBackend`], so tests
//! can swap in a scripted [`testing::FakeBackend`]. The backend does no
//! classification and no retries: it turns a request into a status and a
//! decoded body, or a [`TransportError`] when no response arrived.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::config::ClientConfig;
use crate::error::TransportError;

// ============================================================================
// Wire types
// ============================================================================

/// HTTP methods the platform API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Patch => Self::PATCH,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// A fully resolved request, ready for the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl OutboundRequest {
    pub const fn new(method: HttpMethod, url: Url) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Set a header, replacing any existing value with the same name.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.into()));
    }
}

/// Status and decoded body of a response.
///
/// `body` is `None` for an empty body. A body that is not JSON is kept as a
/// JSON string so error pages can still supply a message.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl RawResponse {
    pub const fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }
}

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Sends one request and returns whatever the server answered.
///
/// Implementations must report every received response as `Ok`, whatever
/// its status; `Err` means no response was received.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    async fn execute(&self, request: OutboundRequest) -> Result<RawResponse, TransportError>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production backend using reqwest.
pub struct ReqwestBackend {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestBackend {
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }

    fn map_error(&self, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else if error.is_connect() {
            TransportError::Connect(error.to_string())
        } else {
            TransportError::Network(error)
        }
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn execute(&self, request: OutboundRequest) -> Result<RawResponse, TransportError> {
        let mut builder = self.client.request(request.method.into(), request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| self.map_error(e))?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| self.map_error(e))?;

        Ok(RawResponse::new(status, parse_body(&text)))
    }
}

/// Decode a response body. Empty bodies become `None`.
pub(crate) fn parse_body(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(trimmed.to_string())))
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================

#[cfg(any(test, feature = "test-utils"))]
pub mod testing {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Mutex, PoisonError};

    /// Canned behaviour for the fake backend.
    #[derive(Debug, Clone)]
    pub enum CannedResponse {
        /// Answer with a status and an optional body.
        Reply { status: u16, body: Option<Value> },
        /// Fail before any response, like a refused connection.
        Unreachable,
        /// Never answer.
        Hang,
    }

    impl CannedResponse {
        /// `200` with a JSON body.
        pub const fn ok(body: Value) -> Self {
            Self::Reply {
                status: 200,
                body: Some(body),
            }
        }

        /// Any status with a JSON body.
        pub const fn status(status: u16, body: Value) -> Self {
            Self::Reply {
                status,
                body: Some(body),
            }
        }

        /// Any status without a body.
        pub const fn empty(status: u16) -> Self {
            Self::Reply { status, body: None }
        }
    }

    /// A fake backend returning canned responses by URL pattern.
    ///
    /// The longest pattern contained in the request path wins. A pattern
    /// registered with several responses plays them in order and then keeps
    /// repeating the last one. Unknown paths answer `404`.
    #[derive(Default)]
    pub struct FakeBackend {
        routes: Mutex<Vec<(String, VecDeque<CannedResponse>)>>,
        default_response: Option<CannedResponse>,
        requests: Mutex<Vec<OutboundRequest>>,
    }

    impl FakeBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Add a canned response for paths containing `path_contains`.
        #[must_use]
        pub fn with_response(self, path_contains: &str, response: CannedResponse) -> Self {
            self.with_sequence(path_contains, vec![response])
        }

        /// Add a sequence of responses for paths containing `path_contains`.
        #[must_use]
        pub fn with_sequence(self, path_contains: &str, responses: Vec<CannedResponse>) -> Self {
            self.routes
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push((path_contains.to_string(), responses.into()));
            self
        }

        /// Response for paths that match no pattern.
        #[must_use]
        pub fn with_default(mut self, response: CannedResponse) -> Self {
            self.default_response = Some(response);
            self
        }

        /// Every request received so far, oldest first.
        pub fn requests(&self) -> Vec<OutboundRequest> {
            self.requests
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        pub fn last_request(&self) -> Option<OutboundRequest> {
            self.requests
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .last()
                .cloned()
        }

        pub fn request_count(&self) -> usize {
            self.requests
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .len()
        }

        fn find_response(&self, path: &str) -> Option<CannedResponse> {
            let mut routes = self.routes.lock().unwrap_or_else(PoisonError::into_inner);
            let best = routes
                .iter_mut()
                .filter(|(pattern, _)| path.contains(pattern.as_str()))
                .max_by_key(|(pattern, _)| pattern.len());
            if let Some((_, queue)) = best {
                return if queue.len() > 1 {
                    queue.pop_front()
                } else {
                    queue.front().cloned()
                };
            }
            drop(routes);
            self.default_response.clone()
        }
    }

    #[async_trait]
    impl HttpBackend for FakeBackend {
        async fn execute(&self, request: OutboundRequest) -> Result<RawResponse, TransportError> {
            let path = request.url.path().to_string();
            self.requests
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(request);

            match self.find_response(&path) {
                Some(CannedResponse::Reply { status, body }) => Ok(RawResponse::new(status, body)),
                Some(CannedResponse::Unreachable) => {
                    Err(TransportError::Connect("connection refused".to_string()))
                }
                Some(CannedResponse::Hang) => {
                    std::future::pending::<()>().await;
                    Err(TransportError::Connect("unreachable".to_string()))
                }
                None => Ok(RawResponse::new(404, None)),
            }
        }
    }
}
