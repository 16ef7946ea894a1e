use serde::Serialize;
use serde_json::Value;

use txcheck_common::Colors;
use txcheck_core::CheckOutcome;
use txcheck_core::Expectation;
use txcheck_core::FixtureField;
use txcheck_core::HexId;
use txcheck_core::VerificationReport;
use txcheck_core::format_amount;

use crate::commands::OutputFormat;
use crate::error::HarnessError;

/// Output of the CLI, one implementation per [`OutputFormat`].
pub trait Presenter {
    /// Present the result of a completed verification run.
    fn present_report(&self, txid: &HexId, report: &VerificationReport);

    /// Present a fixture that passed validation.
    fn present_expectation(&self, expectation: &Expectation);

    /// Present a run that ended before producing a report.
    fn present_error(&self, error: &HarnessError);
}

/// Human-readable output.
pub struct TextPresenter;

impl TextPresenter {
    fn outcome_line(outcome: &CheckOutcome) -> String {
        let mark = if outcome.passed() {
            Colors::success("✓")
        } else {
            Colors::error("✗")
        };
        let detail = match &outcome.failure {
            None => outcome.actual.clone(),
            Some(failure) => failure.to_string(),
        };
        format!("{} {:<14} {}", mark, outcome.check.as_str(), detail)
    }
}

impl Presenter for TextPresenter {
    fn present_report(&self, txid: &HexId, report: &VerificationReport) {
        println!("{} {}", Colors::bold("Transaction"), Colors::hash(txid.as_str()));
        for outcome in report.outcomes() {
            println!("  {}", Self::outcome_line(outcome));
        }

        let total = report.outcomes().len();
        let passed = report.passed_count();
        if report.passed() {
            println!(
                "{} all {} checks passed",
                Colors::success("Verified:"),
                total
            );
        } else {
            println!(
                "{} {} of {} checks failed",
                Colors::error("Failed:"),
                total - passed,
                total
            );
        }
    }

    fn present_expectation(&self, expectation: &Expectation) {
        println!("{} fixture is valid", Colors::success("✓"));
        for (field, value) in expectation_fields(expectation) {
            println!("  {} {}", Colors::dim(&format!("{:<22}", field.as_str())), value);
        }
    }

    fn present_error(&self, error: &HarnessError) {
        eprintln!("{} {}", Colors::error("Error:"), error);
        if let Some(suggestion) = error.suggestion() {
            eprintln!("{} {}", Colors::dim("Suggestion:"), suggestion);
        }
    }
}

/// Machine-readable output: one JSON document on stdout per invocation.
pub struct JsonPresenter;

impl Presenter for JsonPresenter {
    fn present_report(&self, txid: &HexId, report: &VerificationReport) {
        print_json(&report_json(txid, report));
    }

    fn present_expectation(&self, expectation: &Expectation) {
        print_json(&serde_json::json!({
            "status": "valid",
            "fixture": expectation,
        }));
    }

    fn present_error(&self, error: &HarnessError) {
        print_json(&error_json(error));
    }
}

fn print_json(value: &Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}

/// Create a presenter based on the output format.
pub fn create_presenter(format: OutputFormat) -> Box<dyn Presenter> {
    match format {
        OutputFormat::Json => Box::new(JsonPresenter),
        OutputFormat::Text => Box::new(TextPresenter),
    }
}

#[derive(Serialize)]
struct ReportDocument<'a> {
    status: &'static str,
    txid: &'a str,
    checks: Vec<CheckDocument<'a>>,
}

#[derive(Serialize)]
struct CheckDocument<'a> {
    check: &'static str,
    passed: bool,
    expected: &'a str,
    actual: &'a str,
    message: String,
}

pub fn report_json(txid: &HexId, report: &VerificationReport) -> Value {
    let document = ReportDocument {
        status: if report.passed() { "verified" } else { "failed" },
        txid: txid.as_str(),
        checks: report
            .outcomes()
            .iter()
            .map(|outcome| CheckDocument {
                check: outcome.check.as_str(),
                passed: outcome.passed(),
                expected: &outcome.expected,
                actual: &outcome.actual,
                message: outcome.message(),
            })
            .collect(),
    };
    serde_json::to_value(document).unwrap_or_default()
}

pub fn error_json(error: &HarnessError) -> Value {
    let mut output = serde_json::json!({
        "status": "error",
        "category": error.category().as_str(),
        "message": error.to_string(),
    });
    if let Some(suggestion) = error.suggestion() {
        output["suggestion"] = serde_json::json!(suggestion);
    }
    output
}

fn expectation_fields(expectation: &Expectation) -> [(FixtureField, String); 10] {
    [
        (
            FixtureField::TransactionId,
            expectation.transaction_id().to_string(),
        ),
        (
            FixtureField::MinerInputAddress,
            expectation.miner_input_address().to_string(),
        ),
        (
            FixtureField::MinerInputAmount,
            format_amount(&expectation.miner_input_amount()),
        ),
        (
            FixtureField::TraderInputAddress,
            expectation.trader_input_address().to_string(),
        ),
        (
            FixtureField::TraderInputAmount,
            format_amount(&expectation.trader_input_amount()),
        ),
        (
            FixtureField::MinerChangeAddress,
            expectation.miner_change_address().to_string(),
        ),
        (
            FixtureField::MinerChangeAmount,
            format_amount(&expectation.miner_change_amount()),
        ),
        (FixtureField::Fee, format_amount(&expectation.fee())),
        (
            FixtureField::BlockHeight,
            expectation.block_height().to_string(),
        ),
        (FixtureField::BlockHash, expectation.block_hash().to_string()),
    ]
}
