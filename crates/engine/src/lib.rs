//! Execution engine interface for the inbox node.
//!
//! The sequencer hands the engine one ordered input at a time and the engine applies it to the L2
//! state, recording a [`Receipt`] for every input, including deterministically rejected ones.
//! Replicas that feed the same input sequence into the same engine implementation end up with the
//! same state root.

use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;
use auto_impl::auto_impl;
use inbox_node_primitives::{DelayedMessage, L2Transaction, Receipt};

mod error;
pub use error::EngineError;

mod in_memory;
pub use in_memory::InMemoryEngine;

mod metrics;

/// A client capable of executing ordered inputs against the L2 state.
#[async_trait]
#[auto_impl(&, Arc)]
pub trait ExecutionEngine: Send + Sync {
    /// Applies a native L2 transaction, returning the recorded receipt.
    ///
    /// A rejection is not an error: the engine records a rejected receipt and returns it, since
    /// every replica must observe the same outcome for the same input.
    async fn apply_transaction(&self, tx: L2Transaction) -> Result<Receipt, EngineError>;

    /// Applies a delayed message delivered from the L1 inbox.
    async fn apply_delayed_message(&self, msg: &DelayedMessage) -> Result<Receipt, EngineError>;

    /// Seals the open L2 block, returning its number. Subsequent inputs land in the next block.
    async fn seal_block(&self) -> Result<u64, EngineError>;

    /// Returns the balance of the account.
    async fn balance_of(&self, address: Address) -> Result<U256, EngineError>;

    /// Returns the receipt recorded for the input hash, if any.
    async fn receipt(&self, tx_hash: B256) -> Result<Option<Receipt>, EngineError>;

    /// Returns a commitment to the full L2 state.
    async fn state_root(&self) -> Result<B256, EngineError>;

    /// Returns the number of sealed L2 blocks.
    async fn block_number(&self) -> Result<u64, EngineError>;
}
