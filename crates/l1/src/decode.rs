use crate::abi::MessageDelivered;
use alloy_primitives::Address;
use alloy_sol_types::SolEvent;
use inbox_node_primitives::{DelayedMessage, L1Block, MessageKind};

/// An error decoding a delayed message from an inbox log.
///
/// Fatal to the decoding node's progress: a log matching the event signature must never be
/// skipped, or the gapless-index invariant breaks.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// A log matching the `MessageDelivered` signature carries a payload that cannot be parsed.
    #[error("failed to decode MessageDelivered log in l1 block {l1_block}: {source}")]
    Log {
        /// The L1 block containing the log.
        l1_block: u64,
        /// The underlying ABI decoding error.
        source: alloy_sol_types::Error,
    },
    /// A delayed message carries an unknown kind tag.
    #[error("unknown delayed message kind {kind:#04x} for message {index} in l1 block {l1_block}")]
    UnknownKind {
        /// The unknown kind tag.
        kind: u8,
        /// The index of the offending message.
        index: u64,
        /// The L1 block containing the log.
        l1_block: u64,
    },
}

/// Decodes the ordered set of [`DelayedMessage`]s contained in a confirmed L1 block.
///
/// Logs from other contracts or with other event signatures are ignored; intra-block log order is
/// preserved. Pure: no side effects.
pub fn decode_delayed_messages(
    block: &L1Block,
    inbox_address: Address,
) -> Result<Vec<DelayedMessage>, DecodeError> {
    let mut messages = Vec::new();

    for log in &block.logs {
        if log.address != inbox_address ||
            log.data.topics().first() != Some(&MessageDelivered::SIGNATURE_HASH)
        {
            continue;
        }

        let event = MessageDelivered::decode_log(log)
            .map_err(|source| DecodeError::Log { l1_block: block.number, source })?
            .data;
        let kind = MessageKind::try_from(event.kind).map_err(|kind| DecodeError::UnknownKind {
            kind,
            index: event.messageIndex,
            l1_block: block.number,
        })?;

        messages.push(DelayedMessage {
            index: event.messageIndex,
            kind,
            sender: event.sender,
            payload: event.data,
            l1_block_number: block.number,
            l1_block_timestamp: block.timestamp,
        });
    }

    Ok(messages)
}
