use alloy_primitives::B256;
use std::fmt;

/// The reason a transaction or delayed message was rejected by the execution engine.
///
/// Rejections are a function of the ordered input stream only, so every replica records the same
/// rejection for the same input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The transaction was bound to a different chain id.
    InvalidChainId,
    /// The transaction nonce does not match the sender's account nonce.
    InvalidNonce {
        /// The account nonce the engine expected.
        expected: u64,
        /// The nonce carried by the transaction.
        got: u64,
    },
    /// The sender balance does not cover the transferred value.
    InsufficientBalance,
    /// The payload could not be decoded into a known transaction shape.
    MalformedTx,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChainId => write!(f, "invalid chain id"),
            Self::InvalidNonce { expected, got } => {
                write!(f, "invalid nonce: expected {expected}, got {got}")
            }
            Self::InsufficientBalance => write!(f, "insufficient balance"),
            Self::MalformedTx => write!(f, "malformed transaction payload"),
        }
    }
}

/// The execution outcome of a single input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxOutcome {
    /// The input was applied to the L2 state.
    Applied,
    /// The input was deterministically rejected; no state change besides the receipt.
    Rejected(RejectReason),
}

impl TxOutcome {
    /// Whether the input was applied.
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// The receipt recorded by the execution engine for an applied or rejected input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Receipt {
    /// The hash of the executed input.
    pub tx_hash: B256,
    /// The L2 block the input was executed in.
    pub l2_block_number: u64,
    /// The delayed-queue index the input was derived from, or `None` for inputs applied to the
    /// engine directly.
    pub delayed_index: Option<u64>,
    /// The execution outcome.
    pub outcome: TxOutcome,
}
