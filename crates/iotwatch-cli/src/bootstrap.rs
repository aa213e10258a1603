//! CLI bootstrap - the composition root.
//!
//! The only place where the session file, the session context, the terminal
//! ports and the transport client are wired together. Handlers receive the
//! composed [`CliContext`].

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use iotwatch_core::SessionContext;
use iotwatch_http::{
    ClientConfig, DefaultTransportClient, HttpBackend, ReqwestBackend, TransportClient,
};

use crate::error::CliError;
use crate::parser::Cli;
use crate::session_file::JsonFileStorage;
use crate::terminal::{LoginHintNavigator, TerminalNotifier};

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Transport settings (base URL, timeout).
    pub client: ClientConfig,
    /// Where the session is persisted between runs.
    pub session_file: PathBuf,
}

impl CliConfig {
    /// Resolve configuration from the environment, overridden by flags.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let mut client = ClientConfig::from_env();
        if let Some(url) = cli.api_url.as_deref().filter(|u| !u.trim().is_empty()) {
            client = client.with_base_url(url.trim());
        }
        if let Some(secs) = cli.timeout {
            if secs == 0 {
                return Err(CliError::Config(
                    "timeout must be at least 1 second".to_string(),
                ));
            }
            client = client.with_timeout(Duration::from_secs(secs));
        }

        let session_file = match &cli.session_file {
            Some(path) => path.clone(),
            None => default_session_file()?,
        };

        Ok(Self {
            client,
            session_file,
        })
    }
}

/// `<data dir>/iotwatch/session.json`.
pub fn default_session_file() -> Result<PathBuf, CliError> {
    dirs::data_dir()
        .map(|dir| dir.join("iotwatch").join("session.json"))
        .ok_or_else(|| {
            CliError::Config(
                "cannot determine a data directory; pass --session-file".to_string(),
            )
        })
}

/// Fully composed context for CLI commands.
pub struct CliContext<B: HttpBackend = ReqwestBackend> {
    client: TransportClient<B>,
    session_file: PathBuf,
}

impl<B: HttpBackend> CliContext<B> {
    /// Assemble a context from an already-built client.
    pub fn from_parts(client: TransportClient<B>, session_file: impl Into<PathBuf>) -> Self {
        Self {
            client,
            session_file: session_file.into(),
        }
    }

    /// Access the transport client.
    pub const fn client(&self) -> &TransportClient<B> {
        &self.client
    }

    /// Access the session context shared with the client.
    pub fn session(&self) -> &SessionContext {
        self.client.session()
    }

    pub fn session_file(&self) -> &Path {
        &self.session_file
    }
}

/// Bootstrap the CLI application.
///
/// Restores the persisted session (a missing or unreadable file means
/// signed out), then builds the reqwest-backed client with notices going to
/// stderr.
pub fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let storage = Arc::new(JsonFileStorage::new(&config.session_file));
    let session = Arc::new(SessionContext::restore(storage));
    tracing::debug!(
        file = %config.session_file.display(),
        authenticated = session.is_authenticated(),
        "Session loaded"
    );

    let client = DefaultTransportClient::new(config.client, session)
        .map_err(|e| CliError::Config(e.to_string()))?
        .with_notifier(Arc::new(TerminalNotifier::stderr()))
        .with_navigator(Arc::new(LoginHintNavigator));

    Ok(CliContext::from_parts(client, config.session_file))
}
