//! Sequencing of delayed messages into L2 block slots.
//!
//! The sequencer buffers the delayed messages decoded from confirmed L1 blocks, enforces the
//! gapless index invariant, and feeds them to the execution engine in L1 emission order. It holds
//! no consensus role: every replica runs the same sequencing over the same confirmed L1 stream
//! and therefore produces the same L2 chain.

use inbox_node_engine::ExecutionEngine;
use inbox_node_primitives::{DelayedMessage, InboxState, L1Block, SlotPolicy, TxOutcome};
use std::{collections::VecDeque, sync::Arc};

mod error;
pub use error::SequencingError;

mod metrics;
use metrics::SequencerMetrics;

/// The sequencer for the delayed message queue.
///
/// `push_block` ingests the messages of one confirmed L1 block, `produce_slot` seals L2 block
/// slots out of the buffered messages. The inbox cursor only advances past a message once the
/// engine has recorded an outcome for it, so a message is never applied twice and never skipped.
#[derive(Debug)]
pub struct InboxSequencer<E> {
    /// The execution engine inputs are dispatched to.
    engine: Arc<E>,
    /// The replica's inbox cursor.
    state: InboxState,
    /// Messages decoded from confirmed L1 blocks, awaiting execution.
    pending: VecDeque<DelayedMessage>,
    /// The interleaving rule for slot production.
    policy: SlotPolicy,
    metrics: SequencerMetrics,
}

impl<E: ExecutionEngine> InboxSequencer<E> {
    /// Returns a new sequencer with a cursor starting at the provided L1 block.
    pub fn new(engine: Arc<E>, policy: SlotPolicy, start_l1_block: u64) -> Self {
        Self {
            engine,
            state: InboxState::new(start_l1_block),
            pending: VecDeque::new(),
            policy,
            metrics: SequencerMetrics::default(),
        }
    }

    /// The current inbox cursor.
    pub const fn state(&self) -> InboxState {
        self.state
    }

    /// Ingests the delayed messages of one confirmed L1 block.
    ///
    /// `messages` must be the messages of `block` in emission order. The L1 cursor advances even
    /// for blocks without messages, so the cursor always reflects how far derivation has scanned.
    pub fn push_block(
        &mut self,
        block: &L1Block,
        messages: Vec<DelayedMessage>,
    ) -> Result<(), SequencingError> {
        for msg in messages {
            let expected = self.state.next_index + self.pending.len() as u64;
            if msg.index != expected {
                return Err(SequencingError::IndexGap {
                    expected,
                    got: msg.index,
                    l1_block: block.number,
                });
            }
            self.pending.push_back(msg);
        }
        self.state.last_l1_block = block.number;
        self.metrics.pending_messages.set(self.pending.len() as f64);
        Ok(())
    }

    /// Seals the next L2 block slot, executing as many buffered messages as the slot policy
    /// allows.
    ///
    /// Returns the number of messages executed, or `None` when no message was ready. A rejected
    /// message still advances the cursor: the rejection is part of the deterministic outcome.
    pub async fn produce_slot(&mut self) -> Result<Option<usize>, SequencingError> {
        let count = self.policy.messages_for_slot(self.pending.len());
        if count == 0 {
            return Ok(None);
        }

        for _ in 0..count {
            let Some(msg) = self.pending.front() else { break };
            let receipt = self.engine.apply_delayed_message(msg).await?;
            if let TxOutcome::Rejected(reason) = receipt.outcome {
                tracing::warn!(
                    target: "inbox::sequencer",
                    index = msg.index,
                    l1_block = msg.l1_block_number,
                    %reason,
                    "delayed message rejected"
                );
            } else {
                tracing::trace!(
                    target: "inbox::sequencer",
                    index = msg.index,
                    l2_block = receipt.l2_block_number,
                    "delayed message executed"
                );
            }
            self.pending.pop_front();
            self.state.next_index += 1;
            self.metrics.executed_messages.increment(1);
        }

        let sealed = self.engine.seal_block().await?;
        tracing::trace!(target: "inbox::sequencer", l2_block = sealed, messages = count, "slot sealed");
        self.metrics.slots_produced.increment(1);
        self.metrics.pending_messages.set(self.pending.len() as f64);
        Ok(Some(count))
    }
}
