//! An in-memory L1 chain, shared between node replicas under test.

use crate::{DelayedInboxWriter, L1Provider, L1ProviderError};
use alloy_primitives::{keccak256, Address, Bytes, Log};
use inbox_node_l1::abi::message_delivered_log;
use inbox_node_primitives::{L1BlockHeader, L1Log, MessageKind};
use parking_lot::RwLock;
use std::sync::Arc;

const GENESIS_TIMESTAMP: u64 = 1_700_000_000;
const BLOCK_TIME: u64 = 12;

#[derive(Debug)]
struct StoredBlock {
    header: L1BlockHeader,
    logs: Vec<Log>,
}

#[derive(Debug)]
struct Inner {
    blocks: Vec<StoredBlock>,
    pending_logs: Vec<Log>,
    next_delayed_index: u64,
}

/// An in-memory L1 chain implementing both [`L1Provider`] and [`DelayedInboxWriter`].
///
/// Published messages land in a pending set and are included in the next mined block, so tests
/// control exactly when a message becomes part of the L1 history. Cloning shares the chain:
/// replicas observe the same logical L1.
#[derive(Debug, Clone)]
pub struct InMemoryL1 {
    inbox_address: Address,
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryL1 {
    /// Returns a new chain with only a genesis block, watched at the provided inbox address.
    pub fn new(inbox_address: Address) -> Self {
        let genesis = StoredBlock {
            header: L1BlockHeader {
                number: 0,
                hash: keccak256(b"genesis"),
                timestamp: GENESIS_TIMESTAMP,
            },
            logs: Vec::new(),
        };
        Self {
            inbox_address,
            inner: Arc::new(RwLock::new(Inner {
                blocks: vec![genesis],
                pending_logs: Vec::new(),
                next_delayed_index: 0,
            })),
        }
    }

    /// The address of the delayed inbox contract on this chain.
    pub const fn inbox_address(&self) -> Address {
        self.inbox_address
    }

    /// Mines a block containing all pending logs, returning its number.
    pub fn mine_block(&self) -> u64 {
        let mut inner = self.inner.write();
        let parent = inner.blocks.last().expect("genesis always present").header;
        let number = parent.number + 1;
        let header = L1BlockHeader {
            number,
            hash: keccak256([parent.hash.as_slice(), &number.to_be_bytes()].concat()),
            timestamp: parent.timestamp + BLOCK_TIME,
        };
        let logs = std::mem::take(&mut inner.pending_logs);
        inner.blocks.push(StoredBlock { header, logs });
        number
    }

    /// Mines `count` consecutive blocks, returning the new head number.
    pub fn mine_blocks(&self, count: u64) -> u64 {
        let mut head = self.head();
        for _ in 0..count {
            head = self.mine_block();
        }
        head
    }

    /// Returns the current head number.
    pub fn head(&self) -> u64 {
        self.inner.read().blocks.last().expect("genesis always present").header.number
    }

    /// Returns the next delayed message index the inbox will assign.
    pub fn next_delayed_index(&self) -> u64 {
        self.inner.read().next_delayed_index
    }

    /// Appends a raw log to the pending set without going through the inbox.
    ///
    /// Lets tests stage malformed or gapped logs the real contract would never emit.
    pub fn push_raw_log(&self, log: Log) {
        self.inner.write().pending_logs.push(log);
    }
}

#[async_trait::async_trait]
impl L1Provider for InMemoryL1 {
    async fn head_number(&self) -> Result<u64, L1ProviderError> {
        Ok(self.head())
    }

    async fn block(&self, number: u64) -> Result<Option<L1BlockHeader>, L1ProviderError> {
        Ok(self.inner.read().blocks.get(number as usize).map(|b| b.header))
    }

    async fn logs(
        &self,
        address: Address,
        from: u64,
        to: u64,
    ) -> Result<Vec<L1Log>, L1ProviderError> {
        let inner = self.inner.read();
        let mut logs = Vec::new();
        for block in &inner.blocks {
            let number = block.header.number;
            if number < from || number > to {
                continue;
            }
            logs.extend(
                block
                    .logs
                    .iter()
                    .filter(|log| log.address == address)
                    .map(|log| L1Log { block_number: number, inner: log.clone() }),
            );
        }
        Ok(logs)
    }
}

#[async_trait::async_trait]
impl DelayedInboxWriter for InMemoryL1 {
    async fn publish_message(
        &self,
        kind: MessageKind,
        sender: Address,
        payload: Bytes,
    ) -> Result<u64, L1ProviderError> {
        let mut inner = self.inner.write();
        let index = inner.next_delayed_index;
        inner.next_delayed_index += 1;
        let log = message_delivered_log(self.inbox_address, index, kind, sender, payload);
        inner.pending_logs.push(log);
        Ok(index)
    }
}
