//! L1 watcher for the delayed-inbox rollup node.

mod error;
pub use error::L1WatcherError;
use error::L1WatcherResult;

mod metrics;
pub use metrics::WatcherMetrics;

mod retry;
pub use retry::Retry;

use alloy_primitives::Address;
use inbox_node_primitives::{DeployInfo, L1Block, NodeConfig};
use inbox_node_providers::L1Provider;
use std::collections::VecDeque;

/// The L1 watcher produces the lazy, restartable sequence of confirmed L1 blocks a replica
/// derives from.
///
/// A block is confirmed once its height is at least
/// [`confirmation_depth`](NodeConfig::confirmation_depth) below the current L1 head; this
/// protects against L1 reorgs reordering or removing messages already delivered to the L2. The
/// watcher prefetches inbox logs over [`log_query_block_range`](NodeConfig::log_query_block_range)
/// sized windows, advances its cursor only once a block and its logs have been fetched, and never
/// emits the same height twice.
#[derive(Debug)]
pub struct L1Watcher<P> {
    /// The L1 data source.
    provider: P,
    /// The address of the delayed inbox contract to filter logs for.
    inbox_address: Address,
    /// The number of L1 blocks that must follow a block before it is emitted.
    confirmation_depth: u64,
    /// The maximum block range covered by a single log query.
    log_query_block_range: u64,
    /// The last block height emitted.
    current_block_number: u64,
    /// Confirmed blocks fetched ahead of consumption.
    buffered: VecDeque<L1Block>,
    /// The latest L1 head observed.
    l1_head: u64,
    /// The retry strategy for transient provider failures.
    retry: Retry,
    /// The metrics for the watcher.
    metrics: WatcherMetrics,
}

impl<P> L1Watcher<P>
where
    P: L1Provider,
{
    /// Returns a new [`L1Watcher`] scanning from the configured start block or the inbox
    /// deployment height, whichever is higher.
    pub fn new(provider: P, deploy_info: &DeployInfo, config: &NodeConfig) -> Self {
        let start_block = config.start_l1_block.max(deploy_info.deployed_at);
        Self {
            provider,
            inbox_address: deploy_info.inbox_address,
            confirmation_depth: config.confirmation_depth,
            // A zero range would make every fetch window empty and stall the watcher.
            log_query_block_range: config.log_query_block_range.max(1),
            current_block_number: start_block.saturating_sub(1),
            buffered: VecDeque::new(),
            l1_head: 0,
            retry: Retry::default(),
            metrics: WatcherMetrics::default(),
        }
    }

    /// The last block height emitted.
    pub const fn current_block_number(&self) -> u64 {
        self.current_block_number
    }

    /// The latest L1 head observed.
    pub const fn l1_head(&self) -> u64 {
        self.l1_head
    }

    /// Returns the next confirmed L1 block, or `None` when the watcher is caught up with the
    /// confirmed tip.
    ///
    /// Heights are strictly increasing across calls. On error the cursor is left in place and
    /// the same height is returned by the next successful call.
    pub async fn next_confirmed_block(&mut self) -> L1WatcherResult<Option<L1Block>> {
        if self.buffered.is_empty() {
            self.fill_buffer().await?;
        }

        Ok(self.buffered.pop_front().inspect(|block| {
            self.current_block_number = block.number;
            self.metrics.confirmed_blocks.increment(1);
            tracing::trace!(target: "inbox::watcher", number = block.number, logs = block.logs.len(), "confirmed block");
        }))
    }

    /// Fetches the next window of confirmed blocks and their inbox logs into the buffer.
    async fn fill_buffer(&mut self) -> L1WatcherResult<()> {
        let head = self.retry.retry("head_number", || self.provider.head_number()).await?;
        self.l1_head = head;

        let confirmed = head.saturating_sub(self.confirmation_depth);
        if confirmed <= self.current_block_number {
            return Ok(());
        }

        let from = self.current_block_number + 1;
        let to = confirmed.min(self.current_block_number.saturating_add(self.log_query_block_range));

        tracing::trace!(target: "inbox::watcher", from, to, head, "fetching confirmed blocks");

        let logs =
            self.retry.retry("logs", || self.provider.logs(self.inbox_address, from, to)).await?;
        let mut logs = logs.into_iter().peekable();

        let mut fetched = Vec::with_capacity((to - from + 1) as usize);
        for number in from..=to {
            let header = self
                .retry
                .retry("block", || self.provider.block(number))
                .await?
                .ok_or(L1WatcherError::MissingBlock(number))?;

            let mut block = L1Block::from(header);
            while let Some(log) = logs.next_if(|log| log.block_number == number) {
                block.logs.push(log.inner);
            }
            self.metrics.inbox_logs.increment(block.logs.len() as u64);
            fetched.push(block);
        }

        if logs.next().is_some() {
            return Err(L1WatcherError::LogOutsideRange { from, to });
        }

        self.buffered.extend(fetched);
        Ok(())
    }
}
