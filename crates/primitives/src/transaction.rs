use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use alloy_rlp::{RlpDecodable, RlpEncodable};

/// The decoded form of a native L2 transfer transaction.
///
/// Key management and signature recovery are supplied by the excluded bootstrapping layer, so the
/// sender is carried explicitly instead of being recovered from a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct TransferTx {
    /// The L2 chain id the transaction is bound to.
    pub chain_id: u64,
    /// The sender nonce.
    pub nonce: u64,
    /// The gas limit for the transaction.
    pub gas_limit: u64,
    /// The sending account.
    pub from: Address,
    /// The receiving account.
    pub to: Address,
    /// The transferred value.
    pub value: U256,
}

impl TransferTx {
    /// Encodes the transaction into its opaque signed representation.
    pub fn into_l2_transaction(self) -> L2Transaction {
        L2Transaction::new(alloy_rlp::encode(&self).into())
    }
}

/// An opaque signed L2 transaction: raw bytes plus the hash derived from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct L2Transaction {
    raw: Bytes,
    hash: B256,
}

impl L2Transaction {
    /// Returns a new [`L2Transaction`] wrapping the provided raw bytes.
    pub fn new(raw: Bytes) -> Self {
        let hash = keccak256(&raw);
        Self { raw, hash }
    }

    /// The raw transaction bytes.
    pub const fn raw(&self) -> &Bytes {
        &self.raw
    }

    /// The transaction hash.
    pub const fn hash(&self) -> B256 {
        self.hash
    }

    /// Decodes the raw bytes into a [`TransferTx`].
    pub fn decode(&self) -> Result<TransferTx, alloy_rlp::Error> {
        <TransferTx as alloy_rlp::Decodable>::decode(&mut self.raw.as_ref())
    }
}
