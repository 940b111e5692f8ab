use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use alloy_rlp::{RlpDecodable, RlpEncodable};

/// The kind of a delayed message, as tagged in the inbox contract event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MessageKind {
    /// An L1 deposit minting funds on the L2.
    Deposit = 0x01,
    /// A native L2 transaction routed through the delayed inbox.
    L2Message = 0x02,
}

impl MessageKind {
    /// Returns the byte tag for the kind.
    pub const fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u8> for MessageKind {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x01 => Ok(Self::Deposit),
            0x02 => Ok(Self::L2Message),
            unknown => Err(unknown),
        }
    }
}

/// A message originating on the L1 that must be delivered into L2 execution.
///
/// Uniquely identified by its `index`: the delayed message queue is global and gapless, and a
/// message must never be applied twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelayedMessage {
    /// The global, gapless index of the message in the delayed queue.
    pub index: u64,
    /// The message kind.
    pub kind: MessageKind,
    /// The L1 sender of the message.
    pub sender: Address,
    /// The message payload.
    pub payload: Bytes,
    /// The number of the L1 block the message was emitted in.
    pub l1_block_number: u64,
    /// The timestamp of the L1 block the message was emitted in.
    pub l1_block_timestamp: u64,
}

impl DelayedMessage {
    /// Returns the hash identifying the message, derived from its kind, index and payload.
    pub fn hash(&self) -> B256 {
        let mut buf = Vec::with_capacity(1 + 8 + self.payload.len());
        buf.push(self.kind.as_u8());
        buf.extend_from_slice(&self.index.to_be_bytes());
        buf.extend_from_slice(&self.payload);
        keccak256(&buf)
    }

    /// Returns the hash under which the execution outcome of this message is recorded.
    ///
    /// For an [`MessageKind::L2Message`] this is the hash of the wrapped raw transaction, so a
    /// submitter can look up the receipt with the hash it computed locally.
    pub fn receipt_hash(&self) -> B256 {
        match self.kind {
            MessageKind::L2Message => keccak256(&self.payload),
            MessageKind::Deposit => self.hash(),
        }
    }
}

#[cfg(feature = "arbitrary")]
impl arbitrary::Arbitrary<'_> for DelayedMessage {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        Ok(Self {
            index: u.arbitrary::<u32>()? as u64,
            kind: if u.arbitrary()? { MessageKind::Deposit } else { MessageKind::L2Message },
            sender: u.arbitrary()?,
            payload: u.arbitrary::<Vec<u8>>()?.into(),
            l1_block_number: u.arbitrary::<u32>()? as u64,
            l1_block_timestamp: u.arbitrary()?,
        })
    }
}

/// The payload of a [`MessageKind::Deposit`] message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct DepositPayload {
    /// The L2 account credited by the deposit.
    pub to: Address,
    /// The deposited value.
    pub value: U256,
}

impl DepositPayload {
    /// RLP-encodes the payload.
    pub fn encoded(&self) -> Bytes {
        alloy_rlp::encode(self).into()
    }

    /// RLP-decodes a payload.
    pub fn decode(mut buf: &[u8]) -> Result<Self, alloy_rlp::Error> {
        <Self as alloy_rlp::Decodable>::decode(&mut buf)
    }
}
