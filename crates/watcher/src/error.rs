use inbox_node_primitives::ErrorKind;
use inbox_node_providers::L1ProviderError;

/// A [`Result`] that uses [`L1WatcherError`] as the error type.
pub(crate) type L1WatcherResult<T> = Result<T, L1WatcherError>;

/// An error that occurred in the L1 watcher.
#[derive(Debug, thiserror::Error)]
pub enum L1WatcherError {
    /// The L1 provider failed past the retry budget.
    #[error("l1 provider error: {0}")]
    Provider(#[from] L1ProviderError),
    /// The provider reported a block below the confirmed height as missing.
    #[error("unknown l1 block {0} below the confirmed height")]
    MissingBlock(u64),
    /// The provider returned a log outside the queried block range.
    #[error("provider returned a log outside the queried range [{from}, {to}]")]
    LogOutsideRange {
        /// The start of the queried range.
        from: u64,
        /// The end of the queried range.
        to: u64,
    },
}

impl L1WatcherError {
    /// Returns the classification of the error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Provider(_) | Self::MissingBlock(_) => ErrorKind::Transient,
            Self::LogOutsideRange { .. } => ErrorKind::Fatal,
        }
    }
}
