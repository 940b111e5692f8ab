//! Interleaving policies: both orderings converge, but they pack L2 blocks differently.

use alloy_primitives::U256;
use eyre::Result;
use inbox_node_primitives::{DepositPayload, MessageKind, SlotPolicy};
use inbox_node_providers::DelayedInboxWriter;
use std::time::Duration;
use tests::{owner, user2, wait_for_status, TestEnv};

const TIMEOUT: Duration = Duration::from_secs(5);

async fn publish_three_deposits(env: &TestEnv) -> Result<()> {
    for value in 1..=3u64 {
        env.l1()
            .publish_message(
                MessageKind::Deposit,
                owner(),
                DepositPayload { to: user2(), value: U256::from(value) }.encoded(),
            )
            .await?;
    }
    env.l1().mine_block();
    env.l1().mine_blocks(2);
    Ok(())
}

#[tokio::test]
async fn test_one_per_block_seals_one_l2_block_per_message() -> Result<()> {
    let env = TestEnv::with_depth(2);
    let mut node = env.follower_node();
    node.start()?;

    publish_three_deposits(&env).await?;
    wait_for_status(&node, TIMEOUT, |s| s.next_delayed_index == 3).await?;

    assert_eq!(node.l2_block_number().await?, 3);
    assert_eq!(node.balance_of(user2()).await?, U256::from(6u64));
    node.stop().await;
    Ok(())
}

#[tokio::test]
async fn test_drain_packs_ready_messages_into_one_l2_block() -> Result<()> {
    let mut env = TestEnv::with_depth(2);
    env.config.slot_policy = SlotPolicy::DrainReady;
    let mut node = env.follower_node();
    node.start()?;

    publish_three_deposits(&env).await?;
    wait_for_status(&node, TIMEOUT, |s| s.next_delayed_index == 3).await?;

    // All three messages were ready in the same L1 block, so they share one L2 block.
    assert_eq!(node.l2_block_number().await?, 1);
    assert_eq!(node.balance_of(user2()).await?, U256::from(6u64));
    node.stop().await;
    Ok(())
}
