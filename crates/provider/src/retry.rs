//! Bounded retry for racy remote operations
//!
//! The platform reports a concurrent operation on the same entity with an
//! opaque error it also uses for missing entities, so no error category
//! can be singled out: the few call sites known to race simply retry
//! unconditionally up to their attempt budget.

use std::future::Future;
use std::time::Duration;

use nimbus_common::Result;
use tracing::warn;

/// Fixed delay between attempts.
const RETRY_DELAY: Duration = Duration::from_secs(30);

/// Invoke `op` up to `max_attempts` times, returning on first success.
/// After exhausting the budget the last error is surfaced.
pub async fn retry<T, F, Fut>(max_attempts: u32, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < max_attempts => {
                warn!(attempt, max_attempts, error = %err, "operation failed, retrying");
                tokio::time::sleep(RETRY_DELAY).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
