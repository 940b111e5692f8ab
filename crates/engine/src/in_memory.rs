use crate::{metrics::EngineMetrics, EngineError, ExecutionEngine};
use alloy_primitives::{keccak256, Address, B256, U256};
use alloy_rlp::RlpEncodable;
use async_trait::async_trait;
use inbox_node_primitives::{
    DelayedMessage, DepositPayload, L2Transaction, MessageKind, Receipt, RejectReason, TransferTx,
    TxOutcome,
};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};

/// An L2 account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Account {
    balance: U256,
    nonce: u64,
}

/// A single account row in the state commitment preimage.
#[derive(RlpEncodable)]
struct AccountEntry {
    address: Address,
    balance: U256,
    nonce: u64,
}

#[derive(Debug, Default)]
struct EngineState {
    accounts: BTreeMap<Address, Account>,
    receipts: HashMap<B256, Receipt>,
    block_number: u64,
}

impl EngineState {
    /// Validates and applies a transfer against the current state.
    fn transfer(&mut self, chain_id: u64, tx: &TransferTx) -> TxOutcome {
        if tx.chain_id != chain_id {
            return TxOutcome::Rejected(RejectReason::InvalidChainId);
        }
        let (nonce, balance) = self
            .accounts
            .get(&tx.from)
            .map(|account| (account.nonce, account.balance))
            .unwrap_or((0, U256::ZERO));
        if tx.nonce != nonce {
            return TxOutcome::Rejected(RejectReason::InvalidNonce { expected: nonce, got: tx.nonce });
        }
        if balance < tx.value {
            return TxOutcome::Rejected(RejectReason::InsufficientBalance);
        }

        let sender = self.accounts.entry(tx.from).or_default();
        sender.balance -= tx.value;
        sender.nonce += 1;
        self.accounts.entry(tx.to).or_default().balance += tx.value;
        TxOutcome::Applied
    }

    /// Mints the deposited value to the credited account.
    fn deposit(&mut self, payload: &DepositPayload) -> TxOutcome {
        self.accounts.entry(payload.to).or_default().balance += payload.value;
        TxOutcome::Applied
    }

    /// Records the outcome of an input under the given hash, into the open L2 block.
    ///
    /// The first receipt recorded under a hash is kept: replaying the same bytes rejects on the
    /// consumed nonce but never rewrites an earlier outcome.
    fn record(&mut self, hash: B256, delayed_index: Option<u64>, outcome: TxOutcome) -> Receipt {
        let receipt = Receipt {
            tx_hash: hash,
            l2_block_number: self.block_number + 1,
            delayed_index,
            outcome,
        };
        *self.receipts.entry(hash).or_insert(receipt)
    }

    fn state_root(&self) -> B256 {
        let entries: Vec<AccountEntry> = self
            .accounts
            .iter()
            .map(|(address, account)| AccountEntry {
                address: *address,
                balance: account.balance,
                nonce: account.nonce,
            })
            .collect();
        keccak256(alloy_rlp::encode(&entries))
    }
}

/// A deterministic in-memory execution engine.
///
/// The state transition is a pure function of the ordered input sequence, so any two instances
/// constructed with the same chain id and genesis allocation converge to the same
/// [`state root`](ExecutionEngine::state_root) when fed the same inputs.
#[derive(Debug)]
pub struct InMemoryEngine {
    chain_id: u64,
    state: RwLock<EngineState>,
    metrics: EngineMetrics,
}

impl InMemoryEngine {
    /// Returns a new engine with the provided genesis allocation.
    pub fn new(chain_id: u64, genesis_alloc: impl IntoIterator<Item = (Address, U256)>) -> Self {
        let accounts = genesis_alloc
            .into_iter()
            .map(|(address, balance)| (address, Account { balance, nonce: 0 }))
            .collect();
        Self {
            chain_id,
            state: RwLock::new(EngineState { accounts, ..Default::default() }),
            metrics: EngineMetrics::default(),
        }
    }

    /// Returns the sender nonce expected by the engine.
    pub fn nonce_of(&self, address: Address) -> u64 {
        self.state.read().accounts.get(&address).map(|account| account.nonce).unwrap_or(0)
    }

    fn process(&self, hash: B256, delayed_index: Option<u64>, outcome: TxOutcome) -> Receipt {
        let receipt = self.state.write().record(hash, delayed_index, outcome);
        match outcome {
            TxOutcome::Applied => self.metrics.applied_inputs.increment(1),
            TxOutcome::Rejected(reason) => {
                tracing::debug!(target: "inbox::engine", tx_hash = %hash, %reason, "input rejected");
                self.metrics.rejected_inputs.increment(1);
            }
        }
        receipt
    }

    fn execute_transaction(&self, tx: L2Transaction, delayed_index: Option<u64>) -> Receipt {
        let outcome = match tx.decode() {
            Err(_) => TxOutcome::Rejected(RejectReason::MalformedTx),
            Ok(decoded) => self.state.write().transfer(self.chain_id, &decoded),
        };
        self.process(tx.hash(), delayed_index, outcome)
    }
}

#[async_trait]
impl ExecutionEngine for InMemoryEngine {
    async fn apply_transaction(&self, tx: L2Transaction) -> Result<Receipt, EngineError> {
        Ok(self.execute_transaction(tx, None))
    }

    async fn apply_delayed_message(&self, msg: &DelayedMessage) -> Result<Receipt, EngineError> {
        match msg.kind {
            MessageKind::L2Message => Ok(self
                .execute_transaction(L2Transaction::new(msg.payload.clone()), Some(msg.index))),
            MessageKind::Deposit => {
                let outcome = match DepositPayload::decode(&msg.payload) {
                    Err(_) => TxOutcome::Rejected(RejectReason::MalformedTx),
                    Ok(payload) => self.state.write().deposit(&payload),
                };
                Ok(self.process(msg.receipt_hash(), Some(msg.index), outcome))
            }
        }
    }

    async fn seal_block(&self) -> Result<u64, EngineError> {
        let mut state = self.state.write();
        state.block_number += 1;
        Ok(state.block_number)
    }

    async fn balance_of(&self, address: Address) -> Result<U256, EngineError> {
        Ok(self
            .state
            .read()
            .accounts
            .get(&address)
            .map(|account| account.balance)
            .unwrap_or(U256::ZERO))
    }

    async fn receipt(&self, tx_hash: B256) -> Result<Option<Receipt>, EngineError> {
        Ok(self.state.read().receipts.get(&tx_hash).copied())
    }

    async fn state_root(&self) -> Result<B256, EngineError> {
        Ok(self.state.read().state_root())
    }

    async fn block_number(&self) -> Result<u64, EngineError> {
        Ok(self.state.read().block_number)
    }
}
