use alloy_primitives::{Log, B256};
use std::fmt;

/// Information about a block.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct BlockInfo {
    /// The block number.
    pub number: u64,
    /// The block hash.
    pub hash: B256,
}

impl BlockInfo {
    /// Returns a new instance of [`BlockInfo`].
    pub const fn new(number: u64, hash: B256) -> Self {
        Self { number, hash }
    }
}

impl fmt::Display for BlockInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockInfo {{ number: {}, hash: {} }}", self.number, self.hash)
    }
}

#[cfg(feature = "arbitrary")]
impl arbitrary::Arbitrary<'_> for BlockInfo {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let number = u.int_in_range(0..=u32::MAX)?;
        let hash = B256::arbitrary(u)?;
        Ok(Self { number: number as u64, hash })
    }
}

/// The header fields of an L1 block, as returned by the L1 data source.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct L1BlockHeader {
    /// The block number.
    pub number: u64,
    /// The block hash.
    pub hash: B256,
    /// The block timestamp.
    pub timestamp: u64,
}

impl L1BlockHeader {
    /// Returns the [`BlockInfo`] for the header.
    pub const fn info(&self) -> BlockInfo {
        BlockInfo { number: self.number, hash: self.hash }
    }
}

/// A log entry returned by the L1 data source, tagged with the block it was emitted in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct L1Log {
    /// The number of the L1 block containing the log.
    pub block_number: u64,
    /// The raw log entry.
    pub inner: Log,
}

/// A confirmed L1 block along with the inbox logs it contains, in emission order.
///
/// Immutable once emitted by the watcher: the block sits at least
/// [`confirmation depth`](crate::NodeConfig::confirmation_depth) below the L1 head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct L1Block {
    /// The block number.
    pub number: u64,
    /// The block hash.
    pub hash: B256,
    /// The block timestamp.
    pub timestamp: u64,
    /// The logs emitted in the block, in intra-block emission order.
    pub logs: Vec<Log>,
}

impl L1Block {
    /// Returns the [`BlockInfo`] for the block.
    pub const fn info(&self) -> BlockInfo {
        BlockInfo { number: self.number, hash: self.hash }
    }
}

impl From<L1BlockHeader> for L1Block {
    fn from(header: L1BlockHeader) -> Self {
        Self {
            number: header.number,
            hash: header.hash,
            timestamp: header.timestamp,
            logs: Vec::new(),
        }
    }
}
