//! Configurable retry mechanism for transient L1 provider failures.

use std::time::Duration;

/// A type used for retrying transient failures in operations.
#[derive(Debug, Clone)]
pub struct Retry {
    /// Maximum number of retry attempts. `None` means infinite retries.
    pub max_retries: Option<usize>,
    /// Initial delay between retries.
    pub initial_delay: Duration,
    /// Whether to use exponential backoff.
    pub exponential_backoff: bool,
}

impl Default for Retry {
    fn default() -> Self {
        Self { max_retries: Some(5), initial_delay: Duration::from_millis(50), exponential_backoff: true }
    }
}

impl Retry {
    /// Creates a new [`Retry`] with the specified parameters.
    pub const fn new(
        max_retries: Option<usize>,
        initial_delay: Duration,
        exponential_backoff: bool,
    ) -> Self {
        Self { max_retries, initial_delay, exponential_backoff }
    }

    /// Retry an asynchronous operation with the configured retry strategy.
    pub async fn retry<F, Fut, T, E>(&self, operation_name: &str, operation: F) -> Result<T, E>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T, E>>,
        E: std::fmt::Debug,
    {
        let mut attempt: usize = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(error) => {
                    if let Some(max_retries) = self.max_retries {
                        if attempt >= max_retries {
                            return Err(error);
                        }
                    }

                    attempt += 1;
                    tracing::warn!(
                        target: "inbox::watcher",
                        operation = operation_name,
                        error = ?error,
                        attempt = attempt,
                        "retrying operation"
                    );

                    let delay = if self.exponential_backoff {
                        self.initial_delay * 2_u32.saturating_pow(attempt as u32 - 1)
                    } else {
                        self.initial_delay
                    };

                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
