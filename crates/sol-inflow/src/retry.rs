//! Retry with exponential backoff
//!
//! Shared by the per-signature fetch path. Bounded attempts with a low cap
//! keep worst-case harvest latency predictable while riding out transient
//! rate limiting.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

/// Run `op` up to `max_attempts` times, sleeping `base_delay * 2^(attempt-1)`
/// after each failed attempt (200ms, 400ms, ... for the defaults). Returns the
/// first success, or the last error once attempts are exhausted.
pub async fn retry_with_backoff<T, E, F, Fut>(
    max_attempts: u32,
    base_delay: Duration,
    mut op: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                last_error = Some(e);
                if attempt < max_attempts {
                    sleep(base_delay * 2u32.pow(attempt - 1)).await;
                }
            }
        }
    }

    // max_attempts >= 1, so at least one attempt ran and set last_error
    Err(last_error.unwrap())
}
