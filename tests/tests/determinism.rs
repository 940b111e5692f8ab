//! Cross-replica convergence: replicas started at different times, fed a mix of deposits,
//! transfers and a deterministic rejection, must end on identical state.

use alloy_primitives::U256;
use eyre::Result;
use inbox_node_primitives::{DepositPayload, MessageKind};
use inbox_node_providers::DelayedInboxWriter;
use std::time::Duration;
use tests::{owner, user2, wait_for_status, TestEnv, Wallet, GENESIS_BALANCE};

const TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn test_replicas_converge_regardless_of_start_time() -> Result<()> {
    let env = TestEnv::with_depth(5);
    let mut node_a = env.sequencer_node();
    node_a.start()?;

    let mut owner_wallet = Wallet::new("Owner");
    let mut broke_wallet = Wallet::new("Nobody");

    // First L1 block: a deposit and a funded transfer.
    env.l1()
        .publish_message(
            MessageKind::Deposit,
            owner(),
            DepositPayload { to: user2(), value: U256::from(500u64) }.encoded(),
        )
        .await?;
    node_a.send_transaction(owner_wallet.transfer(user2(), U256::from(1_000u64))).await?;
    env.l1().mine_block();

    // Second L1 block: an unfunded transfer, rejected identically on every replica.
    let doomed =
        node_a.send_transaction(broke_wallet.transfer(owner(), U256::from(1u64))).await?;
    env.l1().mine_blocks(3);

    // A replica started while the messages are still unconfirmed.
    let mut node_b = env.follower_node();
    node_b.start()?;

    env.l1().mine_blocks(5);

    let receipt = node_a.wait_for_transaction(doomed, TIMEOUT).await?;
    assert!(!receipt.outcome.is_applied());
    assert_eq!(receipt.delayed_index, Some(2));

    wait_for_status(&node_a, TIMEOUT, |status| status.next_delayed_index == 3).await?;
    wait_for_status(&node_b, TIMEOUT, |status| status.next_delayed_index == 3).await?;

    // A fresh replica started after everything is confirmed replays from scratch.
    let mut node_c = env.follower_node();
    node_c.start()?;
    wait_for_status(&node_c, TIMEOUT, |status| status.next_delayed_index == 3).await?;

    let reference_root = node_a.state_root().await?;
    let reference_block = node_a.l2_block_number().await?;
    for node in [&node_b, &node_c] {
        assert_eq!(node.state_root().await?, reference_root);
        assert_eq!(node.l2_block_number().await?, reference_block);
        assert_eq!(node.balance_of(user2()).await?, U256::from(1_500u64));
        assert_eq!(node.balance_of(owner()).await?, U256::from(GENESIS_BALANCE - 1_000));
        assert_eq!(node.receipt(doomed).await?, Some(receipt));
    }

    node_a.stop().await;
    node_b.stop().await;
    node_c.stop().await;
    Ok(())
}
