//! Shared harness for the inbox node integration tests.
//!
//! Replicas under test share one in-memory L1 chain and boot from the same genesis allocation,
//! so any state divergence between them is a derivation bug, not a fixture artifact.

use alloy_primitives::{keccak256, Address, U256};
use inbox_node::{NodeStatus, RollupNode};
use inbox_node_engine::InMemoryEngine;
use inbox_node_primitives::{DeployInfo, L2Transaction, NodeConfig, TransferTx};
use inbox_node_providers::test_utils::InMemoryL1;
use std::time::Duration;

/// The L2 chain id used across integration tests.
pub const CHAIN_ID: u64 = 1201;

/// The delayed inbox contract address on the test L1.
pub const INBOX: Address = Address::repeat_byte(0x42);

/// The balance the owner account starts with.
pub const GENESIS_BALANCE: u64 = 1_000_000_000_000_000_000;

/// A replica under test.
pub type TestNode = RollupNode<InMemoryL1, InMemoryEngine>;

/// Derives a deterministic account address from a label.
pub fn account(name: &str) -> Address {
    Address::from_word(keccak256(name.as_bytes()))
}

/// The funded genesis account.
pub fn owner() -> Address {
    account("Owner")
}

/// An initially empty account.
pub fn user2() -> Address {
    account("User2")
}

/// The deployment every test replica watches.
pub fn deploy_info() -> DeployInfo {
    DeployInfo { inbox_address: INBOX, chain_id: CHAIN_ID, deployed_at: 0 }
}

/// A node configuration with a poll interval short enough for test timeouts.
pub fn test_config(confirmation_depth: u64) -> NodeConfig {
    NodeConfig {
        confirmation_depth,
        poll_interval: Duration::from_millis(5),
        ..Default::default()
    }
}

/// Installs the test tracing subscriber, honoring `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A nonce-tracking signer for test transfers.
#[derive(Debug)]
pub struct Wallet {
    address: Address,
    nonce: u64,
}

impl Wallet {
    /// Returns a wallet for the labelled account.
    pub fn new(name: &str) -> Self {
        Self { address: account(name), nonce: 0 }
    }

    /// The wallet's account.
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Builds a transfer with the wallet's next nonce.
    pub fn transfer(&mut self, to: Address, value: U256) -> L2Transaction {
        let tx = TransferTx {
            chain_id: CHAIN_ID,
            nonce: self.nonce,
            gas_limit: 30_000,
            from: self.address,
            to,
            value,
        };
        self.nonce += 1;
        tx.into_l2_transaction()
    }
}

/// A shared in-memory L1 plus the node configuration replicas boot with.
#[derive(Debug)]
pub struct TestEnv {
    l1: InMemoryL1,
    /// The configuration used for every node built from this environment.
    pub config: NodeConfig,
}

impl TestEnv {
    /// An environment with the default confirmation depth of 20.
    pub fn new() -> Self {
        Self::with_depth(20)
    }

    /// An environment with the provided confirmation depth.
    pub fn with_depth(confirmation_depth: u64) -> Self {
        init_tracing();
        Self { l1: InMemoryL1::new(INBOX), config: test_config(confirmation_depth) }
    }

    /// The shared L1 chain.
    pub const fn l1(&self) -> &InMemoryL1 {
        &self.l1
    }

    fn engine(&self) -> InMemoryEngine {
        InMemoryEngine::new(CHAIN_ID, [(owner(), U256::from(GENESIS_BALANCE))])
    }

    /// A replica that can publish transactions to the delayed inbox.
    pub fn sequencer_node(&self) -> TestNode {
        RollupNode::new(self.l1.clone(), self.engine(), deploy_info(), self.config.clone())
            .with_submitter(self.l1.clone())
    }

    /// A derivation-only replica.
    pub fn follower_node(&self) -> TestNode {
        RollupNode::new(self.l1.clone(), self.engine(), deploy_info(), self.config.clone())
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Waits until the node publishes a status satisfying the predicate.
pub async fn wait_for_status(
    node: &TestNode,
    timeout: Duration,
    predicate: impl Fn(&NodeStatus) -> bool,
) -> eyre::Result<NodeStatus> {
    let mut updates = node.status_updates();
    let status = tokio::time::timeout(timeout, async {
        loop {
            if let Some(status) = {
                let status = updates.borrow_and_update();
                predicate(&status).then(|| status.clone())
            } {
                return eyre::Ok(status);
            }
            updates.changed().await?;
        }
    })
    .await
    .map_err(|_| eyre::eyre!("timed out after {timeout:?} waiting for node status"))??;
    Ok(status)
}
