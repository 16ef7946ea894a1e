//! Fixture loading.
//!
//! A fixture is a newline-delimited text record with exactly
//! [`FIXTURE_LINES`] lines in [`FixtureField::ALL`] order.

use std::path::Path;

use rust_decimal::Decimal;
use tracing::debug;

use crate::amount::parse_amount;
use crate::error::FixtureError;
use crate::error::FormatError;
use crate::expectation::Expectation;
use crate::expectation::FixtureField;
use crate::hex_id::HexId;

pub const FIXTURE_LINES: usize = 10;

/// Reads and parses the fixture at `path`.
pub fn load_fixture(path: &Path) -> Result<Expectation, FixtureError> {
    let content = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = content.len(), "Read fixture");

    parse_fixture(&content).map_err(|source| FixtureError::Format {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses fixture text into an [`Expectation`].
///
/// Leading and trailing whitespace of the whole record and of each line is
/// ignored. The fee keeps only its magnitude.
pub fn parse_fixture(input: &str) -> Result<Expectation, FormatError> {
    let lines: Vec<&str> = input.trim().lines().map(str::trim).collect();
    if lines.len() != FIXTURE_LINES {
        return Err(FormatError::LineCount {
            expected: FIXTURE_LINES,
            actual: lines.len(),
        });
    }
    let record = Record { lines: &lines };

    let expectation = Expectation::new(
        record.hex_id(FixtureField::TransactionId)?,
        record.text(FixtureField::MinerInputAddress)?.to_string(),
        record.positive_amount(FixtureField::MinerInputAmount)?,
        record.text(FixtureField::TraderInputAddress)?.to_string(),
        record.positive_amount(FixtureField::TraderInputAmount)?,
        record.text(FixtureField::MinerChangeAddress)?.to_string(),
        record.positive_amount(FixtureField::MinerChangeAmount)?,
        record.fee_magnitude()?,
        record.positive_height(FixtureField::BlockHeight)?,
        record.hex_id(FixtureField::BlockHash)?,
    );

    debug!(
        txid = %expectation.transaction_id(),
        block_height = expectation.block_height(),
        fee = %expectation.fee(),
        "Parsed fixture"
    );
    Ok(expectation)
}

struct Record<'a> {
    lines: &'a [&'a str],
}

impl<'a> Record<'a> {
    fn text(&self, field: FixtureField) -> Result<&'a str, FormatError> {
        match self.lines.get(field.index()) {
            Some(value) if !value.is_empty() => Ok(*value),
            _ => Err(FormatError::EmptyField { field }),
        }
    }

    fn amount(&self, field: FixtureField) -> Result<Decimal, FormatError> {
        let raw = self.text(field)?;
        parse_amount(raw).ok_or_else(|| FormatError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
    }

    fn positive_amount(&self, field: FixtureField) -> Result<Decimal, FormatError> {
        let amount = self.amount(field)?;
        if amount <= Decimal::ZERO {
            return Err(FormatError::NotPositive {
                field,
                value: self.text(field)?.to_string(),
            });
        }
        Ok(amount)
    }

    /// The producer may write the fee negative to denote an outflow.
    fn fee_magnitude(&self) -> Result<Decimal, FormatError> {
        let fee = self.amount(FixtureField::Fee)?.abs();
        if fee.is_zero() {
            return Err(FormatError::NotPositive {
                field: FixtureField::Fee,
                value: self.text(FixtureField::Fee)?.to_string(),
            });
        }
        Ok(fee)
    }

    fn positive_height(&self, field: FixtureField) -> Result<u64, FormatError> {
        let raw = self.text(field)?;
        let height: i64 = raw.parse().map_err(|_| FormatError::InvalidInteger {
            field,
            value: raw.to_string(),
        })?;
        if height <= 0 {
            return Err(FormatError::NotPositive {
                field,
                value: raw.to_string(),
            });
        }
        u64::try_from(height).map_err(|_| FormatError::InvalidInteger {
            field,
            value: raw.to_string(),
        })
    }

    fn hex_id(&self, field: FixtureField) -> Result<HexId, FormatError> {
        let raw = self.text(field)?;
        HexId::parse(raw).map_err(|reason| FormatError::InvalidHex {
            field,
            value: raw.to_string(),
            reason,
        })
    }
}
