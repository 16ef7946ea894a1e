//! One verification run: fixture, node query, checks.

use std::fmt;
use std::path::Path;

use tracing::info;

use txcheck_core::Expectation;
use txcheck_core::VerificationReport;
use txcheck_core::load_fixture;
use txcheck_core::verify;
use txcheck_rpc::NodeQueryClient;
use txcheck_rpc::RpcTransport;

use crate::error::HarnessError;

/// `NotStarted -> FixtureLoaded -> SnapshotFetched -> Verified | Failed`.
///
/// A fixture or node error jumps straight to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessState {
    NotStarted,
    FixtureLoaded,
    SnapshotFetched,
    Verified,
    Failed,
}

impl HarnessState {
    pub fn as_str(&self) -> &'static str {
        match self {
            HarnessState::NotStarted => "not_started",
            HarnessState::FixtureLoaded => "fixture_loaded",
            HarnessState::SnapshotFetched => "snapshot_fetched",
            HarnessState::Verified => "verified",
            HarnessState::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, HarnessState::Verified | HarnessState::Failed)
    }
}

impl fmt::Display for HarnessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct Harness<T: RpcTransport> {
    client: NodeQueryClient<T>,
    state: HarnessState,
    expectation: Option<Expectation>,
}

impl<T: RpcTransport> Harness<T> {
    pub fn new(client: NodeQueryClient<T>) -> Self {
        Self {
            client,
            state: HarnessState::NotStarted,
            expectation: None,
        }
    }

    pub fn state(&self) -> HarnessState {
        self.state
    }

    /// The fixture record, once loaded.
    pub fn expectation(&self) -> Option<&Expectation> {
        self.expectation.as_ref()
    }

    /// Loads `fixture`, fetches its transaction and runs every check.
    ///
    /// Failed checks are reported in the returned report; only fixture and
    /// node errors come back as `Err`.
    pub async fn run(&mut self, fixture: &Path) -> Result<VerificationReport, HarnessError> {
        let result = self.run_inner(fixture).await;
        if result.is_err() {
            self.transition(HarnessState::Failed);
        }
        result
    }

    async fn run_inner(&mut self, fixture: &Path) -> Result<VerificationReport, HarnessError> {
        let expectation = load_fixture(fixture)?;
        let txid = expectation.transaction_id().clone();
        self.expectation = Some(expectation.clone());
        self.transition(HarnessState::FixtureLoaded);

        let snapshot = self.client.get_transaction(&txid).await?;
        self.transition(HarnessState::SnapshotFetched);

        let report = verify(&expectation, &snapshot);
        self.transition(if report.passed() {
            HarnessState::Verified
        } else {
            HarnessState::Failed
        });
        info!(
            txid = %txid,
            passed = report.passed_count(),
            total = report.outcomes().len(),
            "Verification finished"
        );
        Ok(report)
    }

    fn transition(&mut self, next: HarnessState) {
        info!(from = %self.state, to = %next, "Harness state change");
        self.state = next;
    }
}
