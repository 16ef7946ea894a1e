//! Fixture parsing and verification engine for txcheck.
//!
//! The crate holds the two immutable records a verification run works on:
//! the [`Expectation`] parsed from a fixture file and the
//! [`TransactionSnapshot`] built from the node's answer. [`verify`] compares
//! the two and returns one [`CheckOutcome`] per check.

#![deny(clippy::all)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod amount;
mod error;
mod expectation;
pub mod fixture;
mod hex_id;
mod snapshot;
pub mod verifier;

pub use amount::format_amount;
pub use amount::parse_amount;
pub use error::FixtureError;
pub use error::FormatError;
pub use expectation::Expectation;
pub use expectation::FixtureField;
pub use fixture::FIXTURE_LINES;
pub use fixture::load_fixture;
pub use fixture::parse_fixture;
pub use hex_id::HEX_ID_LEN;
pub use hex_id::HexId;
pub use hex_id::HexIdError;
pub use snapshot::Input;
pub use snapshot::Output;
pub use snapshot::TransactionSnapshot;
pub use verifier::Check;
pub use verifier::CheckFailure;
pub use verifier::CheckOutcome;
pub use verifier::VerificationReport;
pub use verifier::verify;

pub use rust_decimal::Decimal;
