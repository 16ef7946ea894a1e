use thiserror::Error;

use txcheck_common::ErrorCategory;
use txcheck_core::FixtureError;
use txcheck_rpc::ClientError;

/// A run that ended before the checks could produce a report.
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

impl HarnessError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            HarnessError::Fixture(_) => ErrorCategory::InvalidInput,
            HarnessError::Client(e) => e.category(),
            HarnessError::Runtime(_) => ErrorCategory::External,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }

    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            HarnessError::Fixture(FixtureError::Io { .. }) => {
                Some("Pass the fixture path with --fixture or TXCHECK_FIXTURE.")
            }
            HarnessError::Fixture(FixtureError::Format { .. }) => {
                Some("Run 'txcheck check-fixture' to validate the file line by line.")
            }
            HarnessError::Client(e) => e.suggestion(),
            HarnessError::Runtime(_) => None,
        }
    }
}
