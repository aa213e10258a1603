//! CLI entry point - the composition root.
//!
//! Parses arguments, bootstraps the context, runs the auth gate and
//! dispatches to a handler. Failed API calls were already reported as
//! notices, so only other errors are printed here.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use iotwatch_cli::error::{exit_code_for, is_reported};
use iotwatch_cli::handlers::{self, Admission};
use iotwatch_cli::presentation::format_user;
use iotwatch_cli::terminal::login_hint;
use iotwatch_cli::{Cli, CliConfig, CliError, bootstrap};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables before clap reads its `env` fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if !is_reported(&err) {
                eprintln!("error: {err:#}");
            }
            if matches!(err.downcast_ref::<CliError>(), Some(CliError::NotSignedIn)) {
                eprintln!("{}", login_hint());
            }
            ExitCode::from(u8::try_from(exit_code_for(&err)).unwrap_or(1))
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::from_cli(&cli)?;

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let ctx = bootstrap(config)?;

    match handlers::admit(&command, ctx.session().state())? {
        Admission::Run => handlers::dispatch(&ctx, command).await,
        Admission::AlreadySignedIn => {
            if let Some(user) = ctx.session().user() {
                println!("Already signed in as {}", format_user(&user));
            }
            println!("Use `iotwatch login --force <username>` to switch accounts.");
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
