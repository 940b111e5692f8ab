use std::fmt;

/// The per-replica inbox cursor.
///
/// `next_index` strictly increases and is never skipped: delayed message `i + 1` may not be
/// applied before message `i`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InboxState {
    /// The last L1 block height scanned.
    pub last_l1_block: u64,
    /// The next delayed message index expected.
    pub next_index: u64,
}

impl InboxState {
    /// Returns a new cursor starting ahead of the provided L1 block, expecting index 0.
    pub const fn new(last_l1_block: u64) -> Self {
        Self { last_l1_block, next_index: 0 }
    }
}

impl fmt::Display for InboxState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "InboxState {{ last_l1_block: {}, next_index: {} }}",
            self.last_l1_block, self.next_index
        )
    }
}
