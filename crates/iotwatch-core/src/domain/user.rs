//! User identity and authentication forms.

use serde::{Deserialize, Serialize};

/// The identity record of a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: i64,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub created_at: String,
}

/// Credentials for `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Registration payload for `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Body returned by login and registration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthPayload {
    pub access_token: String,
    pub user: User,
}

/// Body returned by `POST /auth/refresh`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshedToken {
    #[serde(alias = "token")]
    pub access_token: String,
}
