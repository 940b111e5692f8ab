//! Fatal derivation errors: a replica must halt rather than skip an inbox log it cannot
//! faithfully execute.

use alloy_primitives::{Bytes, Log, LogData, U256};
use eyre::Result;
use inbox_node::NodeState;
use inbox_node_l1::abi::message_delivered_log;
use inbox_node_primitives::{DepositPayload, MessageKind};
use std::time::Duration;
use tests::{owner, user2, wait_for_status, TestEnv, INBOX};

const TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn test_halts_on_undecodable_inbox_log() -> Result<()> {
    let env = TestEnv::with_depth(2);
    let mut node = env.follower_node();
    node.start()?;

    // A log carrying the MessageDelivered signature but a truncated body.
    let good = message_delivered_log(
        INBOX,
        0,
        MessageKind::Deposit,
        owner(),
        DepositPayload { to: user2(), value: U256::from(1u64) }.encoded(),
    );
    let topics = good.data.topics().to_vec();
    let truncated =
        Log { address: INBOX, data: LogData::new_unchecked(topics, Bytes::from_static(&[0x00])) };
    env.l1().push_raw_log(truncated);
    let bad_block = env.l1().mine_block();
    env.l1().mine_blocks(2);

    let status = wait_for_status(&node, TIMEOUT, |s| s.state == NodeState::Stopped).await?;
    let error = status.error.expect("fatal error recorded in status");
    assert!(error.contains(&bad_block.to_string()), "{error}");

    // The cursor never moved past the poisoned block's predecessor.
    assert_eq!(status.next_delayed_index, 0);
    Ok(())
}

#[tokio::test]
async fn test_halts_on_delayed_index_gap() -> Result<()> {
    let env = TestEnv::with_depth(2);
    let mut node = env.follower_node();
    node.start()?;

    // The inbox would assign index 0 next; a forged log claiming index 5 breaks the gapless
    // queue and must stop derivation.
    env.l1().push_raw_log(message_delivered_log(
        INBOX,
        5,
        MessageKind::Deposit,
        owner(),
        DepositPayload { to: user2(), value: U256::from(1u64) }.encoded(),
    ));
    env.l1().mine_block();
    env.l1().mine_blocks(2);

    let status = wait_for_status(&node, TIMEOUT, |s| s.state == NodeState::Stopped).await?;
    let error = status.error.expect("fatal error recorded in status");
    assert!(error.contains("expected 0, got 5"), "{error}");
    assert_eq!(node.balance_of(user2()).await?, U256::ZERO);
    Ok(())
}

#[tokio::test]
async fn test_halts_on_unknown_message_kind() -> Result<()> {
    let env = TestEnv::with_depth(2);
    let mut node = env.follower_node();
    node.start()?;

    // Kind 0x7f is not a known message kind; skipping it would break the gapless queue, so the
    // node must halt instead.
    let good = message_delivered_log(INBOX, 0, MessageKind::Deposit, owner(), Bytes::new());
    let mut body = good.data.data.to_vec();
    // The kind tag is the first word of the ABI-encoded body.
    body[31] = 0x7f;
    let topics = good.data.topics().to_vec();
    env.l1().push_raw_log(Log {
        address: INBOX,
        data: LogData::new_unchecked(topics, body.into()),
    });
    env.l1().mine_block();
    env.l1().mine_blocks(2);

    let status = wait_for_status(&node, TIMEOUT, |s| s.state == NodeState::Stopped).await?;
    let error = status.error.expect("fatal error recorded in status");
    assert!(error.contains("0x7f"), "{error}");
    Ok(())
}
