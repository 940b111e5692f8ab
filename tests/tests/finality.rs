//! Confirmation depth and the transaction waiter.

use alloy_primitives::U256;
use eyre::Result;
use inbox_node::WaitError;
use std::time::{Duration, Instant};
use tests::{user2, TestEnv, Wallet};

#[tokio::test]
async fn test_message_invisible_until_confirmation_depth() -> Result<()> {
    let env = TestEnv::with_depth(5);
    let mut node = env.sequencer_node();
    node.start()?;

    let mut wallet = Wallet::new("Owner");
    let tx_hash = node.send_transaction(wallet.transfer(user2(), U256::from(7u64))).await?;

    // The transaction lands in L1 block 1. At head 5 that block is only 4 deep, one short of
    // the configured depth.
    env.l1().mine_blocks(5);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(node.receipt(tx_hash).await?, None);
    assert_eq!(node.balance_of(user2()).await?, U256::ZERO);

    env.l1().mine_block();
    let receipt = node.wait_for_transaction(tx_hash, Duration::from_secs(5)).await?;
    assert!(receipt.outcome.is_applied());
    assert_eq!(node.balance_of(user2()).await?, U256::from(7u64));

    node.stop().await;
    Ok(())
}

#[tokio::test]
async fn test_waiter_times_out_on_unconfirmed_transaction() -> Result<()> {
    let env = TestEnv::new();
    let mut node = env.sequencer_node();
    node.start()?;

    let mut wallet = Wallet::new("Owner");
    let tx_hash = node.send_transaction(wallet.transfer(user2(), U256::from(1u64))).await?;

    // No mining: the transaction can never confirm, so the waiter must give up on time.
    let timeout = Duration::from_millis(100);
    let started = Instant::now();
    let err = node.wait_for_transaction(tx_hash, timeout).await.expect_err("never confirmed");
    assert!(matches!(err, WaitError::Timeout { elapsed, .. } if elapsed >= timeout), "{err}");
    assert!(started.elapsed() >= timeout);
    assert!(started.elapsed() < Duration::from_secs(2));

    node.stop().await;
    Ok(())
}
