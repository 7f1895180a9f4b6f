//! Retry with exponential back-off and jitter for the Lemon Squeezy client.
//!
//! [`retry_with_backoff`] wraps a fallible async operation and retries on
//! transient errors only: HTTP 429, 5xx, and network-level failures.
//! Application-level errors (other 4xx, missing variant, deserialization)
//! are returned immediately; retrying would repeat the same answer.

use std::future::Future;
use std::time::Duration;

use crate::error::LemonSqueezyError;

/// Returns `true` for errors worth retrying after a back-off delay.
///
/// **Retriable:**
/// - Network-level failures: timeout, connection reset.
/// - HTTP 429: the provider's rate limit; back off and try again.
/// - HTTP 5xx: transient server/infrastructure errors.
///
/// **Not retriable (hard stop):**
/// - Other HTTP 4xx (validation errors, bad auth); the request itself is
///   wrong.
/// - [`LemonSqueezyError::MissingVariant`] — per-item skip, never retried.
/// - [`LemonSqueezyError::Json`] — malformed body.
pub(crate) fn is_retriable(err: &LemonSqueezyError) -> bool {
    match err {
        LemonSqueezyError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        LemonSqueezyError::Api { status, .. } => *status == 429 || (500..600).contains(status),
        LemonSqueezyError::MissingVariant { .. }
        | LemonSqueezyError::Json { .. }
        | LemonSqueezyError::InvalidBaseUrl(_) => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on
/// transient errors.
///
/// Back-off schedule with `backoff_base_ms = 1_000`:
///
/// | Attempt | Sleep before next attempt        |
/// |---------|----------------------------------|
/// | 1       | 1 000 ms × 2⁰ ± 25 % jitter     |
/// | 2       | 1 000 ms × 2¹ ± 25 % jitter     |
/// | 3       | 1 000 ms × 2² ± 25 % jitter     |
///
/// Delay is capped at 60 s. Non-retriable errors are returned immediately.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, LemonSqueezyError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, LemonSqueezyError>>,
{
    const MAX_DELAY_MS: u64 = 60_000;
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "Lemon Squeezy transient error — retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
