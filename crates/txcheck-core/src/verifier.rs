//! Verification checks.
//!
//! Every check compares one aspect of the [`Expectation`] with the
//! [`TransactionSnapshot`]. All checks run on every pass, so one failure
//! never hides another. Amounts compare as exact decimals with no epsilon.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use tracing::warn;

use crate::amount::format_amount;
use crate::expectation::Expectation;
use crate::snapshot::TransactionSnapshot;

pub const EXPECTED_INPUTS: usize = 1;
pub const EXPECTED_OUTPUTS: usize = 2;

const ABSENT: &str = "<absent>";
const NO_MATCHING_OUTPUT: &str = "<no matching output>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Check {
    BlockHeight,
    BlockHash,
    InputCount,
    OutputCount,
    MinerOutput,
    TraderOutput,
    Fee,
}

impl Check {
    pub const ALL: [Check; 7] = [
        Check::BlockHeight,
        Check::BlockHash,
        Check::InputCount,
        Check::OutputCount,
        Check::MinerOutput,
        Check::TraderOutput,
        Check::Fee,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Check::BlockHeight => "block_height",
            Check::BlockHash => "block_hash",
            Check::InputCount => "input_count",
            Check::OutputCount => "output_count",
            Check::MinerOutput => "miner_output",
            Check::TraderOutput => "trader_output",
            Check::Fee => "fee",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Check::BlockHeight => "block height",
            Check::BlockHash => "block hash",
            Check::InputCount => "number of inputs",
            Check::OutputCount => "number of outputs",
            Check::MinerOutput => "miner change output",
            Check::TraderOutput => "trader output",
            Check::Fee => "fee",
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckFailure {
    /// No output carries the expected address.
    #[error("no output pays to {address}")]
    NotFound { address: String },

    #[error("expected {expected}, got {actual}")]
    Mismatch { expected: String, actual: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub check: Check,
    pub expected: String,
    pub actual: String,
    pub failure: Option<CheckFailure>,
}

impl CheckOutcome {
    fn compare(check: Check, expected: String, actual: String) -> Self {
        let failure = (expected != actual).then(|| CheckFailure::Mismatch {
            expected: expected.clone(),
            actual: actual.clone(),
        });
        Self {
            check,
            expected,
            actual,
            failure,
        }
    }

    fn compare_amounts(check: Check, expected: Decimal, actual: Option<Decimal>) -> Self {
        let expected_text = format_amount(&expected);
        let actual_text = actual
            .as_ref()
            .map(format_amount)
            .unwrap_or_else(|| ABSENT.to_string());
        let failure = (actual != Some(expected)).then(|| CheckFailure::Mismatch {
            expected: expected_text.clone(),
            actual: actual_text.clone(),
        });
        Self {
            check,
            expected: expected_text,
            actual: actual_text,
            failure,
        }
    }

    fn not_found(check: Check, address: &str, expected: Decimal) -> Self {
        Self {
            check,
            expected: format!("{} to {}", format_amount(&expected), address),
            actual: NO_MATCHING_OUTPUT.to_string(),
            failure: Some(CheckFailure::NotFound {
                address: address.to_string(),
            }),
        }
    }

    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }

    /// One-line human description, naming the check and both values.
    pub fn message(&self) -> String {
        match &self.failure {
            None => format!("{}: {}", self.check.description(), self.actual),
            Some(failure) => format!("{}: {}", self.check.description(), failure),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
    outcomes: Vec<CheckOutcome>,
}

impl VerificationReport {
    pub fn outcomes(&self) -> &[CheckOutcome] {
        &self.outcomes
    }

    pub fn outcome(&self, check: Check) -> Option<&CheckOutcome> {
        self.outcomes.iter().find(|outcome| outcome.check == check)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.passed())
    }

    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(CheckOutcome::passed)
    }

    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.passed()).count()
    }
}

/// Runs every check in [`Check::ALL`] order.
pub fn verify(expectation: &Expectation, snapshot: &TransactionSnapshot) -> VerificationReport {
    let outcomes = Check::ALL
        .iter()
        .map(|check| run_check(*check, expectation, snapshot))
        .collect();
    VerificationReport { outcomes }
}

pub fn run_check(
    check: Check,
    expectation: &Expectation,
    snapshot: &TransactionSnapshot,
) -> CheckOutcome {
    let outcome = match check {
        Check::BlockHeight => CheckOutcome::compare(
            check,
            expectation.block_height().to_string(),
            snapshot
                .block_height()
                .map(|height| height.to_string())
                .unwrap_or_else(|| ABSENT.to_string()),
        ),
        Check::BlockHash => CheckOutcome::compare(
            check,
            expectation.block_hash().to_string(),
            snapshot
                .block_hash()
                .map(|hash| hash.to_string())
                .unwrap_or_else(|| ABSENT.to_string()),
        ),
        Check::InputCount => CheckOutcome::compare(
            check,
            EXPECTED_INPUTS.to_string(),
            snapshot.inputs().len().to_string(),
        ),
        Check::OutputCount => CheckOutcome::compare(
            check,
            EXPECTED_OUTPUTS.to_string(),
            snapshot.outputs().len().to_string(),
        ),
        Check::MinerOutput => output_check(
            check,
            snapshot,
            expectation.miner_change_address(),
            expectation.miner_change_amount(),
        ),
        Check::TraderOutput => output_check(
            check,
            snapshot,
            expectation.trader_input_address(),
            expectation.trader_input_amount(),
        ),
        Check::Fee => {
            CheckOutcome::compare_amounts(check, expectation.fee(), snapshot.fee_magnitude())
        }
    };

    match &outcome.failure {
        None => debug!(check = %check, value = %outcome.actual, "Check passed"),
        Some(failure) => warn!(check = %check, %failure, "Check failed"),
    }
    outcome
}

fn output_check(
    check: Check,
    snapshot: &TransactionSnapshot,
    address: &str,
    expected: Decimal,
) -> CheckOutcome {
    match snapshot.find_output(address) {
        Some(output) => CheckOutcome::compare_amounts(check, expected, Some(output.value)),
        None => CheckOutcome::not_found(check, address, expected),
    }
}
