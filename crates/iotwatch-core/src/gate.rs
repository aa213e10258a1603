//! Auth gate for navigation targets.
//!
//! Pages are either public or protected. The gate decides, from the session
//! state alone, whether a navigation may proceed or must be redirected.

use crate::ports::{HOME_ROUTE, LOGIN_ROUTE};
use crate::session::SessionState;

/// Access requirement of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Reachable without signing in.
    Public,
    /// Requires an authenticated session.
    Protected,
}

/// Outcome of gating a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Proceed to the requested route.
    Allow,
    /// Send the user to the login entry point.
    Redirect(&'static str),
}

/// Decide whether navigating to `path` may proceed.
///
/// - Protected route while anonymous: redirect to login.
/// - Login page while authenticated: redirect to the dashboard.
pub fn gate(access: RouteAccess, path: &str, state: SessionState) -> GateDecision {
    match (access, state) {
        (RouteAccess::Protected, SessionState::Anonymous) => GateDecision::Redirect(LOGIN_ROUTE),
        (_, SessionState::Authenticated) if is_login(path) => GateDecision::Redirect(HOME_ROUTE),
        _ => GateDecision::Allow,
    }
}

fn is_login(path: &str) -> bool {
    path.split(['?', '#'])
        .next()
        .is_some_and(|p| p.trim_end_matches('/') == LOGIN_ROUTE)
}
