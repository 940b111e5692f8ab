use crate::NodeError;
use std::{
    future::Future,
    time::{Duration, Instant},
};

/// The floor applied to wait poll intervals.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// An error waiting for a condition on the node.
#[derive(Debug, thiserror::Error)]
pub enum WaitError {
    /// The condition did not hold within the timeout.
    #[error("timed out after {elapsed:?} waiting for {what}")]
    Timeout {
        /// A short description of the awaited condition.
        what: &'static str,
        /// How long the wait ran before giving up.
        elapsed: Duration,
    },
    /// Polling the condition failed.
    #[error(transparent)]
    Node(#[from] NodeError),
}

/// Polls `poll` every `interval` until it yields a value, erroring once `timeout` elapses.
///
/// The interval is clamped to [`MIN_POLL_INTERVAL`] so a zero interval cannot spin. Polling
/// errors abort the wait immediately.
pub async fn wait_until<T, F, Fut>(
    what: &'static str,
    interval: Duration,
    timeout: Duration,
    mut poll: F,
) -> Result<T, WaitError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, NodeError>>,
{
    let interval = interval.max(MIN_POLL_INTERVAL);
    let started = Instant::now();
    tokio::time::timeout(timeout, async {
        loop {
            if let Some(value) = poll().await? {
                return Ok(value);
            }
            tokio::time::sleep(interval).await;
        }
    })
    .await
    .map_err(|_| WaitError::Timeout { what, elapsed: started.elapsed() })?
}
