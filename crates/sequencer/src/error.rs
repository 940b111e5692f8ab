use inbox_node_engine::EngineError;
use inbox_node_primitives::ErrorKind;

/// Errors that can occur while sequencing delayed messages.
#[derive(Debug, thiserror::Error)]
pub enum SequencingError {
    /// The delayed message stream skipped or repeated an index.
    ///
    /// The gapless index invariant is broken, so continuing would let replicas diverge.
    #[error("delayed message index gap at L1 block {l1_block}: expected {expected}, got {got}")]
    IndexGap {
        /// The next index the sequencer expected.
        expected: u64,
        /// The index carried by the message.
        got: u64,
        /// The L1 block the offending message was emitted in.
        l1_block: u64,
    },
    /// The execution engine failed.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl SequencingError {
    /// Classifies the error for the caller's retry/halt decision.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::IndexGap { .. } => ErrorKind::Fatal,
            Self::Engine(err) => err.kind(),
        }
    }
}
