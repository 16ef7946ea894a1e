//! Error categories and the process exit codes they map to.
//!
//! Exit codes follow the BSD `sysexits.h` convention, except for failed
//! checks which use the plain test-failure code `1`.

pub const EXIT_VERIFIED: i32 = 0;
pub const EXIT_CHECK_FAILED: i32 = 1;
pub const EX_USAGE: i32 = 64;
pub const EX_DATAERR: i32 = 65;
pub const EX_UNAVAILABLE: i32 = 69;
pub const EX_IOERR: i32 = 74;
pub const EX_TEMPFAIL: i32 = 75;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The fixture is malformed or violates a field invariant.
    InvalidInput,
    /// The node answered for a different transaction than requested.
    Mismatch,
    /// Transport, HTTP or RPC-level failure talking to the node.
    External,
    /// The node did not answer within the configured timeout.
    Timeout,
    /// One or more verification checks failed.
    CheckFailed,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::InvalidInput => "invalid_input",
            ErrorCategory::Mismatch => "mismatch",
            ErrorCategory::External => "external",
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::CheckFailed => "check_failed",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorCategory::InvalidInput => EX_DATAERR,
            ErrorCategory::Mismatch => EX_UNAVAILABLE,
            ErrorCategory::External => EX_IOERR,
            ErrorCategory::Timeout => EX_TEMPFAIL,
            ErrorCategory::CheckFailed => EXIT_CHECK_FAILED,
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
