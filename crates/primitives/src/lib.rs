//! Primitive types for the delayed-inbox rollup node.

pub use block::{BlockInfo, L1Block, L1BlockHeader, L1Log};
mod block;

pub use config::{
    DeployInfo, NodeConfig, SlotPolicy, DEFAULT_CONFIRMATION_DEPTH,
    DEFAULT_LOG_QUERY_BLOCK_RANGE, DEFAULT_POLL_INTERVAL,
};
mod config;

pub use error::ErrorKind;
mod error;

pub use message::{DelayedMessage, DepositPayload, MessageKind};
mod message;

pub use receipt::{Receipt, RejectReason, TxOutcome};
mod receipt;

pub use state::InboxState;
mod state;

pub use transaction::{L2Transaction, TransferTx};
mod transaction;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
