use crate::NodeState;
use inbox_node_engine::EngineError;
use inbox_node_l1::DecodeError;
use inbox_node_primitives::ErrorKind;
use inbox_node_providers::L1ProviderError;
use inbox_node_sequencer::SequencingError;
use inbox_node_watcher::L1WatcherError;

/// Errors surfaced by the rollup node.
#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    /// The node cannot be started from its current lifecycle state.
    #[error("node cannot start from the {0} state")]
    InvalidState(NodeState),
    /// The L1 watcher failed.
    #[error(transparent)]
    Watcher(#[from] L1WatcherError),
    /// An inbox log could not be decoded into a delayed message.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// Sequencing failed.
    #[error(transparent)]
    Sequencing(#[from] SequencingError),
    /// The execution engine failed.
    #[error(transparent)]
    Engine(#[from] EngineError),
    /// The node was built without a delayed inbox submitter.
    #[error("node has no delayed inbox submitter configured")]
    SubmissionUnsupported,
    /// Publishing a message to the delayed inbox failed.
    #[error("delayed inbox submission failed: {0}")]
    Submission(#[from] L1ProviderError),
}

impl NodeError {
    /// Classifies the error for the scan loop's retry/halt decision.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Watcher(err) => err.kind(),
            Self::Sequencing(err) => err.kind(),
            Self::Engine(err) => err.kind(),
            Self::Decode(_) | Self::InvalidState(_) | Self::SubmissionUnsupported => {
                ErrorKind::Fatal
            }
            Self::Submission(_) => ErrorKind::Transient,
        }
    }
}
