//! Exponential backoff for callers that want it.
//!
//! The transport client itself never retries. Wrap a call in [`retry`] to
//! repeat it while it fails with a transient kind
//! ([`ErrorKind::is_transient`](iotwatch_core::ErrorKind::is_transient)).
//! Each failed attempt still produces its own notice.

use std::future::Future;
use std::time::Duration;

use iotwatch_core::ApiResult;

/// How often and how patiently to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub(crate) max_retries: u8,
    pub(crate) base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults to 3 retries after the first attempt.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }

    /// Defaults to 1 second.
    #[must_use]
    pub const fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Delay before retry number `attempt` (zero-based): `base * 2^attempt`.
    pub fn delay_for(&self, attempt: u8) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(u32::from(attempt)))
    }
}

/// Run `operation` until it succeeds, fails with a non-transient error, or
/// no retries are left. The last error is returned.
pub async fn retry<T, F, Fut>(policy: &RetryPolicy, mut operation: F) -> ApiResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ApiResult<T>>,
{
    let mut attempt: u8 = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if e.kind().is_transient() && attempt < policy.max_retries => {
                let delay = policy.delay_for(attempt);
                tracing::debug!(
                    attempt = attempt + 1,
                    max = policy.max_retries,
                    kind = %e.kind(),
                    ?delay,
                    "Retrying after transient failure"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
