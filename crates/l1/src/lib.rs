//! The ABI of the L1 delayed inbox contract and the pure decoding of its logs into
//! [`DelayedMessage`](inbox_node_primitives::DelayedMessage)s.

pub mod abi;

pub use decode::{decode_delayed_messages, DecodeError};
mod decode;
