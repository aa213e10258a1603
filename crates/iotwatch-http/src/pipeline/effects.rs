//! Side effects applied to every failed call.

use std::sync::Arc;

use iotwatch_core::{ApiError, LOGIN_ROUTE, Navigator, Notice, Notifier, SessionContext};

/// The user-visible reactions to a failure: one notice, plus session
/// teardown and a trip to the login route on 401.
#[derive(Clone)]
pub struct SideEffects {
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl SideEffects {
    pub fn new(notifier: Arc<dyn Notifier>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            notifier,
            navigator,
        }
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    #[must_use]
    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    /// Apply the reactions for `error`. Emits exactly one notice.
    pub fn on_failure(&self, error: &ApiError, session: &SessionContext) {
        if error.is_auth_expired() {
            session.clear_session();
            self.navigator.navigate(LOGIN_ROUTE);
        }
        self.notifier.notify(Notice::error(error.message()));
    }
}

impl std::fmt::Debug for SideEffects {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SideEffects").finish_non_exhaustive()
    }
}
