use alloy_primitives::Address;
use std::{fmt, str::FromStr, time::Duration};

/// The default number of L1 blocks that must follow a block before it is derived from.
pub const DEFAULT_CONFIRMATION_DEPTH: u64 = 20;

/// The default scan loop interval once the watcher is synced to the confirmed L1 tip.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// The default log query block range.
pub const DEFAULT_LOG_QUERY_BLOCK_RANGE: u64 = 500;

/// The L1 contracts constituting the bridge a node watches, plus the L2 chain identity.
///
/// Shared read-only value, copied at node creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployInfo {
    /// The address of the delayed inbox contract on the L1.
    pub inbox_address: Address,
    /// The L2 chain id.
    pub chain_id: u64,
    /// The L1 block at which the inbox contract was deployed.
    pub deployed_at: u64,
}

/// The interleaving rule applied when consuming ready delayed messages into L2 block slots.
///
/// Both rules order messages purely by L1 emission order; the policy only decides how many
/// messages a single L2 block consumes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SlotPolicy {
    /// Consume one delayed message per L2 block slot when available.
    #[default]
    OnePerBlock,
    /// Drain all ready delayed messages into a single L2 block.
    DrainReady,
}

impl SlotPolicy {
    /// Returns the number of messages the next L2 block should consume, given the number of
    /// ready messages.
    pub const fn messages_for_slot(&self, ready: usize) -> usize {
        match self {
            Self::OnePerBlock => {
                if ready > 0 {
                    1
                } else {
                    0
                }
            }
            Self::DrainReady => ready,
        }
    }
}

impl FromStr for SlotPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("one-per-block") {
            Ok(Self::OnePerBlock)
        } else if s.eq_ignore_ascii_case("drain") {
            Ok(Self::DrainReady)
        } else {
            Err(format!("expected 'one-per-block' or 'drain', got '{s}'"))
        }
    }
}

impl fmt::Display for SlotPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnePerBlock => write!(f, "one-per-block"),
            Self::DrainReady => write!(f, "drain"),
        }
    }
}

/// The rollup node configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeConfig {
    /// The number of L1 blocks that must follow a block before the watcher derives from it.
    pub confirmation_depth: u64,
    /// The scan loop sleep interval when the watcher is caught up with the confirmed tip.
    pub poll_interval: Duration,
    /// The maximum L1 block range covered by a single log query.
    pub log_query_block_range: u64,
    /// The delayed message interleaving policy.
    pub slot_policy: SlotPolicy,
    /// The L1 block the watcher starts scanning from, unless the deployment is younger.
    pub start_l1_block: u64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            confirmation_depth: DEFAULT_CONFIRMATION_DEPTH,
            poll_interval: DEFAULT_POLL_INTERVAL,
            log_query_block_range: DEFAULT_LOG_QUERY_BLOCK_RANGE,
            slot_policy: SlotPolicy::default(),
            start_l1_block: 0,
        }
    }
}
