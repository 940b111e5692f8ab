//! Two replicas watching the same L1: a transfer submitted through one node must be derived,
//! executed and answered identically by the other.

use alloy_primitives::U256;
use eyre::Result;
use std::time::Duration;
use tests::{owner, user2, TestEnv, Wallet, GENESIS_BALANCE};

const TRANSFER_VALUE: u64 = 1_000_000_000_000;

#[tokio::test]
async fn test_second_node_derives_the_first_nodes_transfer() -> Result<()> {
    let env = TestEnv::new();
    let mut node_a = env.sequencer_node();
    let mut node_b = env.follower_node();
    node_a.start()?;
    node_b.start()?;

    let mut wallet = Wallet::new("Owner");
    let tx = wallet.transfer(user2(), U256::from(TRANSFER_VALUE));
    let tx_hash = node_a.send_transaction(tx).await?;

    // The transaction only exists as a delayed message so far; extend the L1 past the
    // confirmation depth to let both replicas derive it.
    env.l1().mine_blocks(30);

    let receipt_a = node_a.wait_for_transaction(tx_hash, Duration::from_secs(5)).await?;
    let receipt_b = node_b.wait_for_transaction(tx_hash, Duration::from_secs(5)).await?;
    assert!(receipt_a.outcome.is_applied());
    // The transfer was the first message ever delivered to the inbox.
    assert_eq!(receipt_a.delayed_index, Some(0));
    assert_eq!(receipt_a, receipt_b);

    for node in [&node_a, &node_b] {
        assert_eq!(node.balance_of(user2()).await?, U256::from(TRANSFER_VALUE));
        assert_eq!(
            node.balance_of(owner()).await?,
            U256::from(GENESIS_BALANCE - TRANSFER_VALUE)
        );
        assert_eq!(node.status().next_delayed_index, 1);
    }
    assert_eq!(node_a.state_root().await?, node_b.state_root().await?);
    assert_eq!(node_a.l2_block_number().await?, node_b.l2_block_number().await?);

    node_a.stop().await;
    node_b.stop().await;
    Ok(())
}

#[tokio::test]
async fn test_submitting_node_does_not_execute_ahead_of_derivation() -> Result<()> {
    let env = TestEnv::new();
    let mut node = env.sequencer_node();
    node.start()?;

    let mut wallet = Wallet::new("Owner");
    let tx_hash =
        node.send_transaction(wallet.transfer(user2(), U256::from(TRANSFER_VALUE))).await?;

    // Without new confirmed L1 blocks the transaction must not be visible, even on the node
    // that submitted it.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(node.receipt(tx_hash).await?, None);
    assert_eq!(node.balance_of(user2()).await?, U256::ZERO);

    node.stop().await;
    Ok(())
}
