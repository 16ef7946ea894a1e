use std::path::PathBuf;

use thiserror::Error;

use crate::expectation::FixtureField;
use crate::hex_id::HexIdError;

/// A fixture that cannot become an [`crate::Expectation`].
///
/// Any of these rejects the whole record; there are no partial fixtures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("fixture must have exactly {expected} lines, found {actual}")]
    LineCount { expected: usize, actual: usize },

    #[error("{field} is empty")]
    EmptyField { field: FixtureField },

    #[error("{field}: '{value}' is not a valid decimal number")]
    InvalidNumber { field: FixtureField, value: String },

    #[error("{field}: '{value}' is not a valid integer")]
    InvalidInteger { field: FixtureField, value: String },

    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: FixtureField, value: String },

    #[error("{field}: '{value}' is not a transaction hash: {reason}")]
    InvalidHex {
        field: FixtureField,
        value: String,
        reason: HexIdError,
    },
}

impl FormatError {
    /// The offending field, when the error is about a single line.
    pub fn field(&self) -> Option<FixtureField> {
        match self {
            FormatError::LineCount { .. } => None,
            FormatError::EmptyField { field }
            | FormatError::InvalidNumber { field, .. }
            | FormatError::InvalidInteger { field, .. }
            | FormatError::NotPositive { field, .. }
            | FormatError::InvalidHex { field, .. } => Some(*field),
        }
    }
}

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("failed to read fixture {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid fixture {}: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },
}

impl FixtureError {
    pub fn format_error(&self) -> Option<&FormatError> {
        match self {
            FixtureError::Format { source, .. } => Some(source),
            FixtureError::Io { .. } => None,
        }
    }
}
