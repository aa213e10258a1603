//! Command handlers.
//!
//! Handlers follow one pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext<B>, ...) -> Result<()>`
//! - Thin wrappers that call the transport client and format the result
//!   for the terminal.
//!
//! Failed API calls have already produced a notice on stderr by the time a
//! handler sees the error, so handlers return it without printing.

pub mod alarms;
pub mod auth;
pub mod dashboard;
pub mod devices;
pub mod predictions;
pub mod sensors;
pub mod templates;

use anyhow::Result;
use iotwatch_core::{GateDecision, LOGIN_ROUTE, SessionState, gate};
use iotwatch_http::HttpBackend;

use crate::bootstrap::CliContext;
use crate::commands::Commands;
use crate::error::CliError;

/// Outcome of running a command through the auth gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Run,
    /// `login` while a session is active and `--force` was not given.
    AlreadySignedIn,
}

/// Gate `command` on the current session state.
pub fn admit(command: &Commands, state: SessionState) -> Result<Admission, CliError> {
    let (access, route) = command.route();
    match gate(access, route, state) {
        GateDecision::Allow => Ok(Admission::Run),
        GateDecision::Redirect(LOGIN_ROUTE) => Err(CliError::NotSignedIn),
        GateDecision::Redirect(_) => match command {
            Commands::Login { force: true, .. } => Ok(Admission::Run),
            _ => Ok(Admission::AlreadySignedIn),
        },
    }
}

/// Route a command to its handler.
pub async fn dispatch<B: HttpBackend>(ctx: &CliContext<B>, command: Commands) -> Result<()> {
    match command {
        Commands::Login {
            username,
            password,
            force,
        } => auth::login(ctx, &username, password, force).await,
        Commands::Register {
            username,
            email,
            password,
        } => auth::register(ctx, &username, &email, password).await,
        Commands::Logout => auth::logout(ctx).await,
        Commands::Whoami { refresh } => auth::whoami(ctx, refresh).await,
        Commands::Refresh => auth::refresh(ctx).await,
        Commands::Dashboard => dashboard::execute(ctx).await,
        Commands::Health => dashboard::health(ctx).await,
        Commands::Devices(cmd) => devices::execute(ctx, cmd).await,
        Commands::Sensors(cmd) => sensors::execute(ctx, cmd).await,
        Commands::Templates(cmd) => templates::execute(ctx, cmd).await,
        Commands::Alarms(cmd) => alarms::execute(ctx, cmd).await,
        Commands::Predictions(cmd) => predictions::execute(ctx, cmd).await,
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::TestCli;
    use super::*;
    use crate::commands::DeviceCommand;
    use iotwatch_http::testing::{CannedResponse, FakeBackend};

    fn login(force: bool) -> Commands {
        Commands::Login {
            username: "alice".to_string(),
            password: Some("pw".to_string()),
            force,
        }
    }

    #[test]
    fn test_protected_command_needs_session() {
        let devices = Commands::Devices(DeviceCommand::List);
        assert!(matches!(
            admit(&devices, SessionState::Anonymous),
            Err(CliError::NotSignedIn)
        ));
        assert_eq!(
            admit(&devices, SessionState::Authenticated).unwrap(),
            Admission::Run
        );
    }

    #[test]
    fn test_login_while_signed_in() {
        assert_eq!(
            admit(&login(false), SessionState::Authenticated).unwrap(),
            Admission::AlreadySignedIn
        );
        assert_eq!(
            admit(&login(true), SessionState::Authenticated).unwrap(),
            Admission::Run
        );
        assert_eq!(
            admit(&login(false), SessionState::Anonymous).unwrap(),
            Admission::Run
        );
    }

    #[test]
    fn test_public_commands_pass_anonymous() {
        for cmd in [Commands::Health, Commands::Logout, Commands::Whoami { refresh: false }] {
            assert_eq!(admit(&cmd, SessionState::Anonymous).unwrap(), Admission::Run);
        }
    }

    #[tokio::test]
    async fn test_dispatch_routes_to_handler() {
        let cli = TestCli::signed_in(FakeBackend::new().with_response(
            "/devices/health",
            CannedResponse::ok(serde_json::json!({
                "success": true,
                "data": {"total": 2, "online": 1, "offline": 1}
            })),
        ));

        dispatch(&cli.ctx, Commands::Devices(DeviceCommand::Health))
            .await
            .unwrap();

        assert!(cli.last_request().url.path().ends_with("/devices/health"));
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use iotwatch_core::testing::{RecordingNavigator, RecordingNotifier};
    use iotwatch_core::{SessionContext, SessionCredential, User};
    use iotwatch_http::testing::FakeBackend;
    use iotwatch_http::{ClientConfig, OutboundRequest, TransportClient};

    use crate::bootstrap::CliContext;

    pub struct TestCli {
        pub ctx: CliContext<FakeBackend>,
        pub notifier: Arc<RecordingNotifier>,
        pub navigator: Arc<RecordingNavigator>,
    }

    impl TestCli {
        pub fn anonymous(backend: FakeBackend) -> Self {
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
                ctx: CliContext::from_parts(client, "/nonexistent/session.json"),
                notifier,
                navigator,
            }
        }

        pub fn signed_in(backend: FakeBackend) -> Self {
            let cli = Self::anonymous(backend);
            cli.ctx
                .session()
                .set_session(SessionCredential::new("tok-cli", user()))
                .unwrap();
            cli
        }

        pub fn requests(&self) -> Vec<OutboundRequest> {
            self.ctx.client().backend().requests()
        }

        pub fn last_request(&self) -> OutboundRequest {
            self.ctx.client().backend().last_request().unwrap()
        }
    }

    pub fn user() -> User {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "username": "alice",
            "email": "alice@example.com",
            "role": "admin"
        }))
        .unwrap()
    }
}
