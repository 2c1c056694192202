//! Deadline-bounded execution of store calls

use crate::error::{KeeperError, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Absolute deadline `budget` from now.
pub fn deadline_after(budget: Duration) -> Instant {
    Instant::now() + budget
}

/// Run `fut` until `deadline`.
///
/// When the deadline passes first, `fut` is dropped, which cancels the
/// in-flight work, and the call fails with [`KeeperError::Timeout`].
pub async fn with_deadline<T, F>(deadline: Instant, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout_at(deadline, fut).await {
        Ok(result) => result,
        Err(_) => Err(KeeperError::Timeout),
    }
}
