#![deny(clippy::all)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! The `txcheck` command line: argument parsing, the verification harness
//! and its presenters.

pub mod commands;
pub mod error;
pub mod handlers;
pub mod harness;
pub mod presenter;

pub use error::HarnessError;
pub use harness::Harness;
pub use harness::HarnessState;
pub use presenter::Presenter;
pub use presenter::create_presenter;
