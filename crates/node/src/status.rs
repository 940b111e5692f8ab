use inbox_node_primitives::BlockInfo;
use std::fmt;

/// The lifecycle state of a rollup node.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// The node has been constructed but not started.
    #[default]
    Created,
    /// The scan loop is running.
    Running,
    /// The scan loop has exited, either on request or on a fatal error.
    Stopped,
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Running => write!(f, "running"),
            Self::Stopped => write!(f, "stopped"),
        }
    }
}

/// A snapshot of the node's derivation progress, published over a watch channel.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NodeStatus {
    /// The lifecycle state.
    pub state: NodeState,
    /// The last confirmed L1 block the node derived from; zero hash until the first block is
    /// consumed.
    pub last_l1_block: BlockInfo,
    /// The next delayed message index the node expects.
    pub next_delayed_index: u64,
    /// The fatal error that halted the node, if any.
    pub error: Option<String>,
}
