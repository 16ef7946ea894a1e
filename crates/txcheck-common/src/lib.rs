//! Common utilities shared across txcheck crates.
//!
//! Provides error categories with their exit codes, color handling and
//! tracing setup.

#![deny(clippy::all)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

mod color;
pub mod error_codes;
pub mod telemetry;

pub use color::Colors;
pub use color::init as color_init;
pub use error_codes::ErrorCategory;
pub use telemetry::TelemetryGuard;
pub use telemetry::init_tracing;
