use alloy_primitives::{Address, Bytes};
use inbox_node_primitives::{L1BlockHeader, L1Log, MessageKind};

/// An error returned by an L1 data source.
///
/// Provider failures are transient by nature (RPC timeouts, connection resets): callers retry
/// with backoff and never advance cursors on failure.
#[derive(Debug, thiserror::Error)]
pub enum L1ProviderError {
    /// The underlying request failed.
    #[error("l1 provider request failed: {0}")]
    Request(String),
    /// The provider reported a block below the head as missing.
    #[error("unknown l1 block {0}")]
    MissingBlock(u64),
}

/// A read-only, append-only view of the L1 history.
///
/// The core never mutates L1 state through this interface.
#[async_trait::async_trait]
#[auto_impl::auto_impl(&, Arc)]
pub trait L1Provider: Send + Sync {
    /// Returns the current L1 head height.
    async fn head_number(&self) -> Result<u64, L1ProviderError>;

    /// Returns the header of the block at the provided height, or `None` if the chain has not
    /// reached it.
    async fn block(&self, number: u64) -> Result<Option<L1BlockHeader>, L1ProviderError>;

    /// Returns the logs emitted by `address` in the inclusive block range `[from, to]`, ordered
    /// by block height and intra-block emission order.
    async fn logs(
        &self,
        address: Address,
        from: u64,
        to: u64,
    ) -> Result<Vec<L1Log>, L1ProviderError>;
}

/// The submission side of the delayed inbox: publishes a message to the L1 inbox contract.
///
/// The production implementation (an L1 wallet calling the inbox contract) belongs to the
/// excluded bootstrapping layer; the in-memory chain implements it for tests.
#[async_trait::async_trait]
pub trait DelayedInboxWriter: Send + Sync {
    /// Publishes a delayed message, returning the queue index the inbox assigned to it.
    async fn publish_message(
        &self,
        kind: MessageKind,
        sender: Address,
        payload: Bytes,
    ) -> Result<u64, L1ProviderError>;
}
