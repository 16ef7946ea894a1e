//! Command handlers. Each returns the process exit code.

use std::path::Path;

use txcheck_common::ErrorCategory;
use txcheck_common::error_codes::EXIT_VERIFIED;
use txcheck_core::load_fixture;
use txcheck_rpc::HttpTransport;
use txcheck_rpc::NodeQueryClient;
use txcheck_rpc::RpcConfig;
use txcheck_rpc::RpcTransport;

use crate::error::HarnessError;
use crate::harness::Harness;
use crate::presenter::Presenter;

/// Runs one verification and presents its report or error.
pub async fn handle_verify<T: RpcTransport>(
    harness: &mut Harness<T>,
    fixture: &Path,
    presenter: &dyn Presenter,
) -> i32 {
    match harness.run(fixture).await {
        Ok(report) => {
            if let Some(expectation) = harness.expectation() {
                presenter.present_report(expectation.transaction_id(), &report);
            }
            if report.passed() {
                EXIT_VERIFIED
            } else {
                ErrorCategory::CheckFailed.exit_code()
            }
        }
        Err(e) => {
            presenter.present_error(&e);
            e.exit_code()
        }
    }
}

/// Builds the HTTP harness and drives it on a current-thread runtime.
pub fn handle_verify_blocking(config: RpcConfig, fixture: &Path, presenter: &dyn Presenter) -> i32 {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => return report_error(HarnessError::Runtime(e), presenter),
    };
    let transport = match HttpTransport::new(config) {
        Ok(transport) => transport,
        Err(e) => return report_error(e.into(), presenter),
    };

    let mut harness = Harness::new(NodeQueryClient::new(transport));
    runtime.block_on(handle_verify(&mut harness, fixture, presenter))
}

pub fn handle_check_fixture(fixture: &Path, presenter: &dyn Presenter) -> i32 {
    match load_fixture(fixture) {
        Ok(expectation) => {
            presenter.present_expectation(&expectation);
            EXIT_VERIFIED
        }
        Err(e) => report_error(e.into(), presenter),
    }
}

fn report_error(error: HarnessError, presenter: &dyn Presenter) -> i32 {
    presenter.present_error(&error);
    error.exit_code()
}
