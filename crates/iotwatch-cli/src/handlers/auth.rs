//! Sign-in, registration, sign-out and identity commands.

use anyhow::Result;
use iotwatch_core::{LoginForm, RegisterForm};
use iotwatch_http::HttpBackend;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::format_user;
use crate::utils::input;

/// Sign in as `username`.
///
/// With `force`, an existing session is discarded first. The password is
/// prompted for when not supplied.
pub async fn login<B: HttpBackend>(
    ctx: &CliContext<B>,
    username: &str,
    password: Option<String>,
    force: bool,
) -> Result<()> {
    if force && ctx.session().clear_session() {
        tracing::debug!("Discarded previous session");
    }

    let password = match password {
        Some(p) => p,
        None => input::prompt_password("Password")?,
    };
    let form = LoginForm {
        username: username.to_string(),
        password,
    };

    let user = ctx.client().login(&form).await?;
    println!("Signed in as {}", format_user(&user));
    Ok(())
}

/// Create an account and sign in with it.
pub async fn register<B: HttpBackend>(
    ctx: &CliContext<B>,
    username: &str,
    email: &str,
    password: Option<String>,
) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => input::prompt_password("Choose a password")?,
    };
    let form = RegisterForm {
        username: username.to_string(),
        email: email.to_string(),
        password,
    };

    let user = ctx.client().register(&form).await?;
    println!("Account created. Signed in as {}", format_user(&user));
    Ok(())
}

pub async fn logout<B: HttpBackend>(ctx: &CliContext<B>) -> Result<()> {
    if ctx.client().logout().await {
        println!("Signed out.");
    } else {
        println!("Not signed in.");
    }
    Ok(())
}

/// Print the signed-in user, optionally reloading it from the server.
pub async fn whoami<B: HttpBackend>(ctx: &CliContext<B>, refresh: bool) -> Result<()> {
    let user = if refresh {
        ctx.client().refresh_profile().await?
    } else {
        ctx.session().user()
    };

    match user {
        Some(user) => {
            println!("{}", format_user(&user));
            Ok(())
        }
        None => Err(CliError::NotSignedIn.into()),
    }
}

/// Renew the stored token without signing in again.
pub async fn refresh<B: HttpBackend>(ctx: &CliContext<B>) -> Result<()> {
    if ctx.client().refresh_token().await? {
        println!("Session renewed.");
        Ok(())
    } else {
        Err(CliError::NotSignedIn.into())
    }
}
