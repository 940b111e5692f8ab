//! `sol!` declarations for the delayed inbox contract events.

use alloy_primitives::{Address, Bytes, Log};
use alloy_sol_types::{sol, SolEvent};
use inbox_node_primitives::MessageKind;

sol! {
    #[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
    #[derive(Debug)]
    event MessageDelivered(
        uint64 indexed messageIndex,
        uint8 kind,
        address sender,
        bytes data
    );
}

/// Builds the [`MessageDelivered`] log the inbox contract emits for a delayed message.
///
/// Used by the submission side and by test fixtures; the node itself only decodes.
pub fn message_delivered_log(
    inbox_address: Address,
    index: u64,
    kind: MessageKind,
    sender: Address,
    payload: Bytes,
) -> Log {
    let event =
        MessageDelivered { messageIndex: index, kind: kind.as_u8(), sender, data: payload };
    Log { address: inbox_address, data: event.encode_log_data() }
}
