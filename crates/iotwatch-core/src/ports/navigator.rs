//! Navigation side effects.
//!
//! On session expiry the client must bring the user back to the login entry
//! point. How that happens (route push, redirect, printed hint) is up to the
//! adapter.

/// Login entry point.
pub const LOGIN_ROUTE: &str = "/login";

/// Landing page for authenticated users.
pub const HOME_ROUTE: &str = "/dashboard";

/// Moves the application to another route.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Present `route` to the user.
    fn navigate(&self, route: &str);
}

/// A navigator for headless contexts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate(&self, _route: &str) {}
}
