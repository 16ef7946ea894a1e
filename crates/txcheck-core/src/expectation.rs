use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::hex_id::HexId;

/// Fixture fields in file order. Line `n` of a fixture holds `ALL[n - 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureField {
    TransactionId,
    MinerInputAddress,
    MinerInputAmount,
    TraderInputAddress,
    TraderInputAmount,
    MinerChangeAddress,
    MinerChangeAmount,
    Fee,
    BlockHeight,
    BlockHash,
}

impl FixtureField {
    pub const ALL: [FixtureField; 10] = [
        FixtureField::TransactionId,
        FixtureField::MinerInputAddress,
        FixtureField::MinerInputAmount,
        FixtureField::TraderInputAddress,
        FixtureField::TraderInputAmount,
        FixtureField::MinerChangeAddress,
        FixtureField::MinerChangeAmount,
        FixtureField::Fee,
        FixtureField::BlockHeight,
        FixtureField::BlockHash,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FixtureField::TransactionId => "transaction id",
            FixtureField::MinerInputAddress => "miner input address",
            FixtureField::MinerInputAmount => "miner input amount",
            FixtureField::TraderInputAddress => "trader input address",
            FixtureField::TraderInputAmount => "trader input amount",
            FixtureField::MinerChangeAddress => "miner change address",
            FixtureField::MinerChangeAmount => "miner change amount",
            FixtureField::Fee => "fee",
            FixtureField::BlockHeight => "block height",
            FixtureField::BlockHash => "block hash",
        }
    }

    /// 1-based line number in the fixture file.
    pub fn line(&self) -> usize {
        self.index() + 1
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            FixtureField::TransactionId => 0,
            FixtureField::MinerInputAddress => 1,
            FixtureField::MinerInputAmount => 2,
            FixtureField::TraderInputAddress => 3,
            FixtureField::TraderInputAmount => 4,
            FixtureField::MinerChangeAddress => 5,
            FixtureField::MinerChangeAmount => 6,
            FixtureField::Fee => 7,
            FixtureField::BlockHeight => 8,
            FixtureField::BlockHash => 9,
        }
    }
}

impl fmt::Display for FixtureField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (line {})", self.as_str(), self.line())
    }
}

/// The transaction a fixture says was mined.
///
/// Only [`crate::parse_fixture`] builds one, after every field passed its
/// shape and positivity checks. The fee is already a magnitude.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Expectation {
    transaction_id: HexId,
    miner_input_address: String,
    miner_input_amount: Decimal,
    trader_input_address: String,
    trader_input_amount: Decimal,
    miner_change_address: String,
    miner_change_amount: Decimal,
    fee: Decimal,
    block_height: u64,
    block_hash: HexId,
}

#[allow(clippy::too_many_arguments)]
impl Expectation {
    pub(crate) fn new(
        transaction_id: HexId,
        miner_input_address: String,
        miner_input_amount: Decimal,
        trader_input_address: String,
        trader_input_amount: Decimal,
        miner_change_address: String,
        miner_change_amount: Decimal,
        fee: Decimal,
        block_height: u64,
        block_hash: HexId,
    ) -> Self {
        Self {
            transaction_id,
            miner_input_address,
            miner_input_amount,
            trader_input_address,
            trader_input_amount,
            miner_change_address,
            miner_change_amount,
            fee,
            block_height,
            block_hash,
        }
    }

    pub fn transaction_id(&self) -> &HexId {
        &self.transaction_id
    }

    pub fn miner_input_address(&self) -> &str {
        &self.miner_input_address
    }

    pub fn miner_input_amount(&self) -> Decimal {
        self.miner_input_amount
    }

    pub fn trader_input_address(&self) -> &str {
        &self.trader_input_address
    }

    pub fn trader_input_amount(&self) -> Decimal {
        self.trader_input_amount
    }

    pub fn miner_change_address(&self) -> &str {
        &self.miner_change_address
    }

    pub fn miner_change_amount(&self) -> Decimal {
        self.miner_change_amount
    }

    pub fn fee(&self) -> Decimal {
        self.fee
    }

    pub fn block_height(&self) -> u64 {
        self.block_height
    }

    pub fn block_hash(&self) -> &HexId {
        &self.block_hash
    }
}
