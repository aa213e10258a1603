//! The transport client.
//!
//! Endpoint wrappers live in submodules as further `impl` blocks on
//! [`TransportClient`], one per API area.

mod alarms;
mod auth;
mod dashboard;
mod devices;
mod predictions;
mod sensors;
mod templates;

use std::sync::Arc;

use iotwatch_core::{
    ApiError, ApiResult, Envelope, ErrorKind, Navigator, NoopNavigator, NoopNotifier, Notifier,
    Page, SessionContext,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::{ClientBuildError, ClientConfig};
use crate::error::TransportError;
use crate::http::{HttpBackend, HttpMethod, OutboundRequest, ReqwestBackend};
use crate::pipeline::{self, SideEffects};
use crate::request::ApiRequest;
use crate::url::build_url;

// ============================================================================
// Type Aliases
// ============================================================================

/// Transport client using the reqwest backend.
pub type DefaultTransportClient = TransportClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// The single component mediating every call to the platform API.
///
/// Generic over the HTTP backend so tests can script responses. Production
/// code uses [`DefaultTransportClient`].
pub struct TransportClient<B: HttpBackend> {
    backend: B,
    config: ClientConfig,
    session: Arc<SessionContext>,
    effects: SideEffects,
}

impl DefaultTransportClient {
    /// Create a client talking to `config.base_url()` over reqwest.
    ///
    /// Notices and navigation are discarded until ports are attached with
    /// [`with_notifier`](Self::with_notifier) and
    /// [`with_navigator`](Self::with_navigator).
    pub fn new(
        config: ClientConfig,
        session: Arc<SessionContext>,
    ) -> Result<Self, ClientBuildError> {
        Url::parse(&config.base_url).map_err(|source| ClientBuildError::InvalidBaseUrl {
            url: config.base_url.clone(),
            source,
        })?;
        let backend = ReqwestBackend::new(&config)?;
        Ok(Self::with_backend(config, backend, session))
    }
}

impl<B: HttpBackend> TransportClient<B> {
    /// Create a client with a custom backend.
    pub fn with_backend(config: ClientConfig, backend: B, session: Arc<SessionContext>) -> Self {
        Self {
            backend,
            config,
            session,
            effects: SideEffects::new(Arc::new(NoopNotifier), Arc::new(NoopNavigator)),
        }
    }

    /// Route failure notices to `notifier`.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.effects = self.effects.with_notifier(notifier);
        self
    }

    /// Route session-expiry navigation to `navigator`.
    #[must_use]
    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.effects = self.effects.with_navigator(navigator);
        self
    }

    pub const fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub const fn backend(&self) -> &B {
        &self.backend
    }

    // ------------------------------------------------------------------------
    // Pipeline
    // ------------------------------------------------------------------------

    /// Run `request` through the full pipeline and return the normalized
    /// envelope.
    ///
    /// On failure the side effects have already run (one notice, plus
    /// session teardown on 401) by the time the error is returned.
    pub async fn send(&self, request: ApiRequest) -> ApiResult<Envelope> {
        let method = request.method;
        let path = request.path.clone();

        let outcome = match self.prepare(request) {
            Ok(outbound) => pipeline::send(&self.backend, outbound, self.config.timeout).await,
            Err(e) => Err(e),
        };

        match pipeline::classify(outcome) {
            Ok(envelope) => {
                tracing::debug!(%method, path, "Request succeeded");
                Ok(envelope)
            }
            Err(error) => Err(self.reject(error, method, &path)),
        }
    }

    /// Send `request` and decode the payload into `T`.
    ///
    /// A payload that does not decode rejects with `InvalidResponse`.
    pub async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<T> {
        let method = request.method;
        let path = request.path.clone();
        let envelope = self.send(request).await?;
        envelope
            .decode()
            .map_err(|e| self.reject_undecodable(&e, method, &path))
    }

    /// Send `request` and decode a list payload with its pagination.
    pub async fn fetch_page<T: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<Page<T>> {
        let method = request.method;
        let path = request.path.clone();
        let envelope = self.send(request).await?;
        envelope
            .decode_page()
            .map_err(|e| self.reject_undecodable(&e, method, &path))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.fetch(ApiRequest::get(path)).await
    }

    pub async fn post<T: DeserializeOwned, P: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &P,
    ) -> ApiResult<T> {
        self.fetch(ApiRequest::post(path).json(payload)).await
    }

    pub async fn put<T: DeserializeOwned, P: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &P,
    ) -> ApiResult<T> {
        self.fetch(ApiRequest::put(path).json(payload)).await
    }

    pub async fn patch<T: DeserializeOwned, P: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &P,
    ) -> ApiResult<T> {
        self.fetch(ApiRequest::patch(path).json(payload)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.fetch(ApiRequest::delete(path)).await
    }

    fn prepare(&self, request: ApiRequest) -> Result<OutboundRequest, TransportError> {
        if let Some(reason) = request.encode_error {
            return Err(TransportError::InvalidRequest(reason));
        }
        let url = build_url(&self.config.base_url, &request.path, &request.query)?;
        let mut outbound = OutboundRequest::new(request.method, url);
        outbound.body = request.body;
        Ok(pipeline::attach_credential(
            outbound,
            &self.session,
            &self.config.base_url,
        ))
    }

    /// Log `error`, apply the failure side effects, and hand it back.
    pub(crate) fn reject(&self, error: ApiError, method: HttpMethod, path: &str) -> ApiError {
        tracing::warn!(
            kind = %error.kind(),
            status = ?error.status(),
            %method,
            path,
            message = error.message(),
            "Request failed"
        );
        self.effects.on_failure(&error, &self.session);
        error
    }

    fn reject_undecodable(
        &self,
        cause: &serde_json::Error,
        method: HttpMethod,
        path: &str,
    ) -> ApiError {
        tracing::debug!(error = %cause, "Payload did not match the expected type");
        self.reject(ApiError::new(ErrorKind::InvalidResponse, None), method, path)
    }
}

impl<B: HttpBackend> std::fmt::Debug for TransportClient<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportClient")
            .field("config", &self.config)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::http::testing::{CannedResponse, FakeBackend};
    use iotwatch_core::testing::{RecordingNavigator, RecordingNotifier};
    use iotwatch_core::{LOGIN_ROUTE, SessionCredential, User};
    use serde_json::{Value, json};
    use std::time::Duration;

    pub struct Harness {
        pub client: TransportClient<FakeBackend>,
        pub notifier: Arc<RecordingNotifier>,
        pub navigator: Arc<RecordingNavigator>,
    }

    impl Harness {
        pub fn new(backend: FakeBackend) -> Self {
            let notifier = Arc::new(RecordingNotifier::new());
            let navigator = Arc::new(RecordingNavigator::new());
            let client = TransportClient::with_backend(
                ClientConfig::default(),
                backend,
                Arc::new(SessionContext::ephemeral()),
            )
            .with_notifier(notifier.clone())
            .with_navigator(navigator.clone());
            Self {
                client,
                notifier,
                navigator,
            }
        }

        pub fn signed_in(backend: FakeBackend) -> Self {
            let harness = Self::new(backend);
            harness
                .client
                .session()
                .set_session(SessionCredential::new("tok-1", test_user()))
                .unwrap();
            harness
        }

        pub fn last_request(&self) -> OutboundRequest {
            self.client.backend().last_request().unwrap()
        }
    }

    pub fn test_user() -> User {
        serde_json::from_value(json!({
            "id": 1,
            "username": "alice",
            "email": "alice@example.com",
            "role": "admin",
            "created_at": "2024-01-01T00:00:00"
        }))
        .unwrap()
    }

    #[test]
    fn test_default_client_creation() {
        let session = Arc::new(SessionContext::ephemeral());
        let client = DefaultTransportClient::new(ClientConfig::new(), session).unwrap();
        assert_eq!(client.config().base_url(), "http://localhost:8000/api");
    }

    #[test]
    fn test_invalid_base_url_is_rejected_at_build() {
        let session = Arc::new(SessionContext::ephemeral());
        let config = ClientConfig::new().with_base_url("nope");
        let result = DefaultTransportClient::new(config, session);
        assert!(matches!(result, Err(ClientBuildError::InvalidBaseUrl { .. })));
    }

    #[tokio::test]
    async fn test_no_credential_no_authorization_header() {
        let h = Harness::new(FakeBackend::new().with_default(CannedResponse::ok(json!({}))));
        let _: Value = h.client.get("/health").await.unwrap();
        assert!(h.last_request().header("Authorization").is_none());
    }

    #[tokio::test]
    async fn test_credential_attached_as_bearer() {
        let h = Harness::signed_in(FakeBackend::new().with_default(CannedResponse::ok(json!({}))));
        let _: Value = h.client.get("/devices").await.unwrap();
        assert_eq!(h.last_request().header("Authorization"), Some("Bearer tok-1"));
    }

    #[tokio::test]
    async fn test_absolute_url_elsewhere_gets_no_bearer() {
        let h = Harness::signed_in(FakeBackend::new().with_default(CannedResponse::ok(json!({}))));
        let _: Value = h.client.get("https://cdn.example.com/firmware").await.unwrap();
        let request = h.last_request();
        assert_eq!(request.url.host_str(), Some("cdn.example.com"));
        assert!(request.header("Authorization").is_none());
    }

    #[tokio::test]
    async fn test_path_resolved_against_base() {
        let h = Harness::new(FakeBackend::new().with_default(CannedResponse::ok(json!({}))));
        let _: Value = h
            .client
            .fetch(ApiRequest::get("/alarms").query(&json!({"status": "active"})))
            .await
            .unwrap();
        assert_eq!(
            h.last_request().url.as_str(),
            "http://localhost:8000/api/alarms?status=active"
        );
    }

    #[tokio::test]
    async fn test_success_resolves_data_without_notice() {
        let h = Harness::new(FakeBackend::new().with_response(
            "/thing",
            CannedResponse::ok(json!({"success": true, "data": {"id": 1}})),
        ));
        let data: Value = h.client.get("/thing").await.unwrap();
        assert_eq!(data, json!({"id": 1}));
        assert_eq!(h.notifier.count(), 0);
    }

    #[tokio::test]
    async fn test_business_failure_rejects_with_one_notice() {
        let h = Harness::signed_in(FakeBackend::new().with_response(
            "/devices",
            CannedResponse::ok(json!({"success": false, "message": "invalid input"})),
        ));

        let err = h
            .client
            .post::<Value, _>("/devices", &json!({"name": ""}))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::BusinessFailure);
        assert_eq!(err.message(), "invalid input");
        assert_eq!(h.notifier.count(), 1);
        assert_eq!(h.notifier.notices()[0].message, "invalid input");
        assert!(h.client.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_401_clears_session_redirects_and_notifies_once() {
        let h = Harness::signed_in(FakeBackend::new().with_response(
            "/devices",
            CannedResponse::status(401, json!({"msg": "Token has expired"})),
        ));

        let err = h.client.get::<Value>("/devices").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::AuthenticationExpired);
        assert!(h.client.session().token().is_none());
        assert!(h.client.session().user().is_none());
        assert_eq!(h.navigator.routes(), vec![LOGIN_ROUTE.to_string()]);
        assert_eq!(h.notifier.count(), 1);
    }

    #[tokio::test]
    async fn test_403_keeps_session() {
        let h = Harness::signed_in(
            FakeBackend::new().with_response("/users", CannedResponse::empty(403)),
        );
        let err = h.client.get::<Value>("/users").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
        assert!(h.client.session().is_authenticated());
        assert!(h.navigator.routes().is_empty());
        assert_eq!(h.notifier.count(), 1);
    }

    #[tokio::test]
    async fn test_not_found_and_server_error() {
        let h = Harness::new(
            FakeBackend::new()
                .with_response("/missing", CannedResponse::empty(404))
                .with_response(
                    "/broken",
                    CannedResponse::status(503, json!("Service Unavailable")),
                ),
        );

        let err = h.client.get::<Value>("/missing").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        let err = h.client.get::<Value>("/broken").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ServerError);
        assert_eq!(h.notifier.count(), 2);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_connectivity_failure() {
        let h = Harness::new(FakeBackend::new().with_default(CannedResponse::Unreachable));
        let err = h.client.get::<Value>("/devices").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConnectivityFailure);
        assert_eq!(err.status(), None);
        assert_eq!(h.notifier.count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_connectivity_failure_with_one_notice() {
        let h = Harness::new(FakeBackend::new().with_default(CannedResponse::Hang));
        let started = tokio::time::Instant::now();

        let err = h.client.get::<Value>("/slow").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ConnectivityFailure);
        assert!(started.elapsed() >= Duration::from_secs(10));
        assert_eq!(h.notifier.count(), 1);
    }

    #[tokio::test]
    async fn test_undecodable_payload_is_invalid_response() {
        let h = Harness::new(FakeBackend::new().with_response(
            "/user",
            CannedResponse::ok(json!({"success": true, "data": "nope"})),
        ));
        let err = h.client.get::<User>("/user").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidResponse);
        assert_eq!(h.notifier.count(), 1);
    }

    #[tokio::test]
    async fn test_unencodable_query_never_reaches_backend() {
        let h = Harness::new(FakeBackend::new().with_default(CannedResponse::ok(json!({}))));
        let err = h
            .client
            .fetch::<Value>(ApiRequest::get("/x").query(&json!({"a": {"b": 1}})))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
        assert_eq!(h.client.backend().request_count(), 0);
        assert_eq!(h.notifier.count(), 1);
    }

    #[tokio::test]
    async fn test_empty_body_resolves_unit() {
        let h = Harness::new(FakeBackend::new().with_default(CannedResponse::empty(204)));
        h.client.delete::<()>("/devices/1").await.unwrap();
        assert_eq!(h.last_request().method, HttpMethod::Delete);
        assert_eq!(h.notifier.count(), 0);
    }

    #[tokio::test]
    async fn test_put_and_patch_send_body_unchanged() {
        let h = Harness::new(
            FakeBackend::new().with_default(CannedResponse::ok(json!({"success": true}))),
        );
        h.client.put::<(), _>("/a", &json!({"x": 1})).await.unwrap();
        assert_eq!(h.last_request().body, Some(json!({"x": 1})));
        h.client.patch::<(), _>("/a", &json!({"y": 2})).await.unwrap();
        assert_eq!(h.last_request().method, HttpMethod::Patch);
        assert_eq!(h.last_request().body, Some(json!({"y": 2})));
    }
}
