//! The rollup node: wires the L1 watcher, message decoding, sequencing and the execution engine
//! into one derivation pipeline.
//!
//! A node derives its entire L2 chain from the confirmed window of the L1: native transactions
//! are not executed on submission but published to the delayed inbox, observed back through the
//! watcher, and executed in L1 emission order like every other delayed message. Replicas watching
//! the same inbox therefore converge on the same state without coordinating with each other.

use alloy_primitives::{Address, B256, U256};
use inbox_node_engine::ExecutionEngine;
use inbox_node_l1::decode_delayed_messages;
use inbox_node_primitives::{
    BlockInfo, DeployInfo, ErrorKind, L2Transaction, MessageKind, NodeConfig, Receipt,
};
use inbox_node_providers::{DelayedInboxWriter, L1Provider};
use inbox_node_sequencer::InboxSequencer;
use inbox_node_watcher::L1Watcher;
use std::{fmt, sync::Arc, time::Duration};
use tokio::{sync::watch, task::JoinHandle};
use tokio_util::sync::CancellationToken;

mod error;
pub use error::NodeError;

mod status;
pub use status::{NodeState, NodeStatus};

mod wait;
pub use wait::{wait_until, WaitError, MIN_POLL_INTERVAL};

/// A rollup node replica.
///
/// Owns the scan loop task and exposes the submission and query surface. All L2 state queries are
/// answered by the node's own engine, reflecting only what the node has derived so far.
pub struct RollupNode<P, E> {
    config: NodeConfig,
    deploy_info: DeployInfo,
    l1_provider: P,
    engine: Arc<E>,
    submitter: Option<Box<dyn DelayedInboxWriter>>,
    status: watch::Sender<NodeStatus>,
    shutdown: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl<P, E> fmt::Debug for RollupNode<P, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RollupNode")
            .field("config", &self.config)
            .field("deploy_info", &self.deploy_info)
            .field("status", &self.status.borrow().clone())
            .finish_non_exhaustive()
    }
}

impl<P, E> RollupNode<P, E>
where
    P: L1Provider + Clone + Send + Sync + 'static,
    E: ExecutionEngine + 'static,
{
    /// Returns a new node in the [`NodeState::Created`] state. Nothing runs until
    /// [`start`](Self::start) is called.
    pub fn new(l1_provider: P, engine: E, deploy_info: DeployInfo, config: NodeConfig) -> Self {
        Self {
            config,
            deploy_info,
            l1_provider,
            engine: Arc::new(engine),
            submitter: None,
            status: watch::Sender::new(NodeStatus::default()),
            shutdown: CancellationToken::new(),
            task: None,
        }
    }

    /// Attaches a delayed inbox submitter, enabling
    /// [`send_transaction`](Self::send_transaction).
    pub fn with_submitter(mut self, submitter: impl DelayedInboxWriter + 'static) -> Self {
        self.submitter = Some(Box::new(submitter));
        self
    }

    /// The node configuration.
    pub const fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// The deployment the node watches.
    pub const fn deploy_info(&self) -> DeployInfo {
        self.deploy_info
    }

    /// A snapshot of the node's derivation progress.
    pub fn status(&self) -> NodeStatus {
        self.status.borrow().clone()
    }

    /// Subscribes to status snapshots.
    pub fn status_updates(&self) -> watch::Receiver<NodeStatus> {
        self.status.subscribe()
    }

    /// Spawns the scan loop.
    ///
    /// Fails unless the node is in the [`NodeState::Created`] state; a stopped node is not
    /// restartable, a fresh replica is.
    pub fn start(&mut self) -> Result<(), NodeError> {
        let state = self.status.borrow().state;
        if state != NodeState::Created {
            return Err(NodeError::InvalidState(state));
        }

        let watcher = L1Watcher::new(self.l1_provider.clone(), &self.deploy_info, &self.config);
        let start_block = watcher.current_block_number();
        let sequencer =
            InboxSequencer::new(self.engine.clone(), self.config.slot_policy, start_block);
        self.status.send_modify(|status| {
            status.state = NodeState::Running;
            status.last_l1_block = BlockInfo::new(start_block, B256::ZERO);
        });

        let scan = ScanLoop {
            watcher,
            sequencer,
            inbox_address: self.deploy_info.inbox_address,
            poll_interval: self.config.poll_interval,
            status: self.status.clone(),
            cancel: self.shutdown.clone(),
        };
        self.task = Some(tokio::spawn(scan.run()));

        tracing::info!(
            target: "inbox::node",
            inbox = %self.deploy_info.inbox_address,
            chain_id = self.deploy_info.chain_id,
            start_block,
            "node started"
        );
        Ok(())
    }

    /// Stops the scan loop and waits for it to exit.
    pub async fn stop(&mut self) {
        self.shutdown.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        self.status.send_modify(|status| status.state = NodeState::Stopped);
        tracing::info!(target: "inbox::node", "node stopped");
    }

    /// Submits a native L2 transaction by publishing it to the delayed inbox on the L1.
    ///
    /// The transaction is not executed here: it takes effect once its L1 block is confirmed and
    /// every replica, this node included, derives it. Returns the transaction hash under which
    /// the receipt will be recorded.
    pub async fn send_transaction(&self, tx: L2Transaction) -> Result<B256, NodeError> {
        let submitter = self.submitter.as_ref().ok_or(NodeError::SubmissionUnsupported)?;
        let sender = tx.decode().map(|decoded| decoded.from).unwrap_or_default();
        let index =
            submitter.publish_message(MessageKind::L2Message, sender, tx.raw().clone()).await?;
        tracing::debug!(target: "inbox::node", tx_hash = %tx.hash(), index, "transaction published to delayed inbox");
        Ok(tx.hash())
    }

    /// Returns the balance of the account in the node's derived state.
    pub async fn balance_of(&self, address: Address) -> Result<U256, NodeError> {
        Ok(self.engine.balance_of(address).await?)
    }

    /// Returns the receipt recorded for the transaction hash, if the node has derived it.
    pub async fn receipt(&self, tx_hash: B256) -> Result<Option<Receipt>, NodeError> {
        Ok(self.engine.receipt(tx_hash).await?)
    }

    /// Returns the node's current L2 state root.
    pub async fn state_root(&self) -> Result<B256, NodeError> {
        Ok(self.engine.state_root().await?)
    }

    /// Returns the node's current L2 block number.
    pub async fn l2_block_number(&self) -> Result<u64, NodeError> {
        Ok(self.engine.block_number().await?)
    }

    /// Waits until the node has recorded a receipt for the transaction hash.
    pub async fn wait_for_transaction(
        &self,
        tx_hash: B256,
        timeout: Duration,
    ) -> Result<Receipt, WaitError> {
        wait_until("transaction receipt", self.config.poll_interval, timeout, || {
            self.receipt(tx_hash)
        })
        .await
    }
}

impl<P, E> Drop for RollupNode<P, E> {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// The scan loop: one task per replica, consuming confirmed L1 blocks in order.
struct ScanLoop<P, E> {
    watcher: L1Watcher<P>,
    sequencer: InboxSequencer<E>,
    inbox_address: Address,
    poll_interval: Duration,
    status: watch::Sender<NodeStatus>,
    cancel: CancellationToken,
}

impl<P, E> ScanLoop<P, E>
where
    P: L1Provider,
    E: ExecutionEngine,
{
    async fn run(mut self) {
        loop {
            let cancel = self.cancel.clone();
            let step = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                step = self.step() => step,
            };

            match step {
                Ok(()) => {}
                Err(err) if err.kind() == ErrorKind::Transient => {
                    tracing::warn!(target: "inbox::node", %err, "transient derivation error, backing off");
                    tokio::select! {
                        biased;
                        _ = self.cancel.cancelled() => break,
                        _ = tokio::time::sleep(self.poll_interval) => {}
                    }
                }
                Err(err) => {
                    tracing::error!(target: "inbox::node", %err, "fatal derivation error, halting");
                    self.status.send_modify(|status| status.error = Some(err.to_string()));
                    break;
                }
            }
        }

        self.status.send_modify(|status| status.state = NodeState::Stopped);
    }

    /// One derivation step: consume the next confirmed L1 block, or sleep when caught up.
    async fn step(&mut self) -> Result<(), NodeError> {
        let Some(block) = self.watcher.next_confirmed_block().await? else {
            tokio::time::sleep(self.poll_interval).await;
            return Ok(());
        };

        let messages = decode_delayed_messages(&block, self.inbox_address)?;
        self.sequencer.push_block(&block, messages)?;
        while self.sequencer.produce_slot().await?.is_some() {}

        let info = block.info();
        let state = self.sequencer.state();
        self.status.send_modify(|status| {
            status.last_l1_block = info;
            status.next_delayed_index = state.next_index;
        });
        Ok(())
    }
}
