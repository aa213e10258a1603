//! Authentication endpoints.
//!
//! Login and registration populate the session context; logout and a failed
//! profile refresh empty it.

use iotwatch_core::{
    ApiError, ApiResult, AuthPayload, ErrorKind, LoginForm, RefreshedToken, RegisterForm,
    SessionCredential, User,
};

use super::TransportClient;
use crate::http::{HttpBackend, HttpMethod};
use crate::request::ApiRequest;

const LOGIN_PATH: &str = "/auth/login";
const REGISTER_PATH: &str = "/auth/register";
const LOGOUT_PATH: &str = "/auth/logout";
const PROFILE_PATH: &str = "/auth/profile";
const REFRESH_PATH: &str = "/auth/refresh";

impl<B: HttpBackend> TransportClient<B> {
    /// Sign in and establish the session.
    pub async fn login(&self, form: &LoginForm) -> ApiResult<User> {
        self.authenticate(LOGIN_PATH, form, "Login failed: invalid response format")
            .await
    }

    /// Create an account and establish the session.
    pub async fn register(&self, form: &RegisterForm) -> ApiResult<User> {
        self.authenticate(REGISTER_PATH, form, "Registration failed: invalid response format")
            .await
    }

    /// Tell the server the session is over, then clear it locally.
    ///
    /// The server call is best-effort: its failure is logged and the local
    /// session is cleared regardless. Returns whether a session was cleared.
    pub async fn logout(&self) -> bool {
        if self.session.is_authenticated() {
            if let Err(e) = self.send(ApiRequest::post(LOGOUT_PATH)).await {
                tracing::debug!(error = %e, "Ignoring logout failure");
            }
        }
        self.session.clear_session()
    }

    /// Reload the signed-in user's identity from the server.
    ///
    /// Returns `Ok(None)` without a request when no session is active. On any
    /// failure the session is cleared.
    pub async fn refresh_profile(&self) -> ApiResult<Option<User>> {
        if !self.session.is_authenticated() {
            return Ok(None);
        }

        let user: User = match self.fetch(ApiRequest::get(PROFILE_PATH)).await {
            Ok(user) => user,
            Err(e) => {
                self.session.clear_session();
                return Err(e);
            }
        };

        if let Err(e) = self.session.update_user(user.clone()) {
            self.session.clear_session();
            return Err(self.reject(storage_error(&e), HttpMethod::Get, PROFILE_PATH));
        }
        Ok(Some(user))
    }

    /// Exchange the current bearer token for a fresh one.
    ///
    /// Returns `Ok(false)` without a request when no session is active. Only
    /// the token changes; the identity is kept.
    pub async fn refresh_token(&self) -> ApiResult<bool> {
        if !self.session.is_authenticated() {
            return Ok(false);
        }

        let refreshed: RefreshedToken = self.fetch(ApiRequest::post(REFRESH_PATH)).await?;
        if refreshed.access_token.trim().is_empty() {
            let error = ApiError::new(
                ErrorKind::InvalidResponse,
                Some("Token refresh failed: invalid response format".to_string()),
            );
            return Err(self.reject(error, HttpMethod::Post, REFRESH_PATH));
        }

        self.session
            .replace_token(&refreshed.access_token)
            .map_err(|e| self.reject(storage_error(&e), HttpMethod::Post, REFRESH_PATH))
    }

    async fn authenticate<F: serde::Serialize + Sync>(
        &self,
        path: &str,
        form: &F,
        malformed: &str,
    ) -> ApiResult<User> {
        let envelope = self.send(ApiRequest::post(path).json(form)).await?;

        let payload = envelope
            .decode::<AuthPayload>()
            .ok()
            .filter(|p| !p.access_token.trim().is_empty());
        let Some(payload) = payload else {
            let error = ApiError::new(ErrorKind::InvalidResponse, Some(malformed.to_string()));
            return Err(self.reject(error, HttpMethod::Post, path));
        };

        let user = payload.user.clone();
        // Switching accounts passes through Anonymous.
        if self.session.clear_session() {
            tracing::debug!(user = %user.username, "Replacing previous session");
        }
        self.session
            .set_session(SessionCredential::from(payload))
            .map_err(|e| self.reject(storage_error(&e), HttpMethod::Post, path))?;
        Ok(user)
    }
}

fn storage_error(cause: &iotwatch_core::StorageError) -> ApiError {
    ApiError::new(
        ErrorKind::StorageFailure,
        Some(format!("{}: {cause}", ErrorKind::StorageFailure.default_message())),
    )
}
