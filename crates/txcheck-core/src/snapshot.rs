use rust_decimal::Decimal;
use serde::Serialize;

use crate::hex_id::HexId;

/// A source reference consumed by the transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Input {
    /// Id of the transaction that created the spent output. `None` for coinbase.
    pub previous_txid: Option<String>,
    pub previous_vout: Option<u32>,
}

impl Input {
    pub fn is_coinbase(&self) -> bool {
        self.previous_txid.is_none()
    }
}

/// A destination and the value it receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Output {
    /// Position in the transaction's output list.
    pub index: u32,
    /// Every address the node attached to this output's script.
    pub addresses: Vec<String>,
    pub value: Decimal,
}

impl Output {
    /// Exact membership in the address list. `"bcrt1qab"` does not match an
    /// output paying `"bcrt1qabc"`.
    pub fn pays_to(&self, address: &str) -> bool {
        self.addresses.iter().any(|candidate| candidate == address)
    }
}

/// The node's authoritative record of one transaction.
///
/// Block fields are `None` while the transaction is unconfirmed. The fee is
/// `None` when the queried wallet did not fund the transaction; when present
/// it keeps the node's sign (negative for the sending wallet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionSnapshot {
    transaction_id: HexId,
    block_height: Option<u64>,
    block_hash: Option<HexId>,
    inputs: Vec<Input>,
    outputs: Vec<Output>,
    fee: Option<Decimal>,
}

impl TransactionSnapshot {
    pub fn new(
        transaction_id: HexId,
        block_height: Option<u64>,
        block_hash: Option<HexId>,
        inputs: Vec<Input>,
        outputs: Vec<Output>,
        fee: Option<Decimal>,
    ) -> Self {
        Self {
            transaction_id,
            block_height,
            block_hash,
            inputs,
            outputs,
            fee,
        }
    }

    pub fn transaction_id(&self) -> &HexId {
        &self.transaction_id
    }

    pub fn block_height(&self) -> Option<u64> {
        self.block_height
    }

    pub fn block_hash(&self) -> Option<&HexId> {
        self.block_hash.as_ref()
    }

    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    /// Signed fee as reported by the node.
    pub fn fee(&self) -> Option<Decimal> {
        self.fee
    }

    pub fn fee_magnitude(&self) -> Option<Decimal> {
        self.fee.map(|fee| fee.abs())
    }

    /// First output, in transaction order, whose address list contains `address`.
    pub fn find_output(&self, address: &str) -> Option<&Output> {
        self.outputs.iter().find(|output| output.pays_to(address))
    }
}
