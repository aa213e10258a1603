//! Dashboard and health commands.

use anyhow::Result;
use iotwatch_http::HttpBackend;

use crate::bootstrap::CliContext;
use crate::presentation::format_dashboard;

/// Headline numbers plus backend component status.
///
/// Both are requested concurrently. Only the numbers are required; a failed
/// status call has already been reported and is left out of the output.
pub async fn execute<B: HttpBackend>(ctx: &CliContext<B>) -> Result<()> {
    let client = ctx.client();
    let (stats, status) = tokio::join!(client.dashboard_stats(), client.system_status());
    let stats = stats?;
    print!("{}", format_dashboard(&stats, status.ok().as_ref()));
    Ok(())
}

/// Liveness check; needs no session.
pub async fn health<B: HttpBackend>(ctx: &CliContext<B>) -> Result<()> {
    let health = ctx.client().health_check().await?;
    println!(
        "API {} at {} (up {:.0}s)",
        health.status,
        ctx.client().config().base_url(),
        health.uptime
    );
    Ok(())
}
