//! Test harness for CLI tests with a mock node
//!
//! Provides a synchronous interface to the async MockNode, bridging async
//! infrastructure with sync `#[test]` functions.

#![allow(dead_code)]

use super::mock_node::{MockNode, NodeReply, RecordedRequest};
use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;
use tokio::runtime::Runtime;

/// Test harness that manages a mock node and a scratch directory.
///
/// ## Example
///
/// ```ignore
/// #[test]
/// fn test_verify() {
///     let harness = TestHarness::new();
///     harness.set_reply(NodeReply::Result(node_result()));
///     let fixture = harness.write_fixture(&standard_fixture());
///     harness.verify(&fixture).success();
/// }
/// ```
pub struct TestHarness {
    node: MockNode,
    dir: TempDir,
    runtime: Runtime,
}

impl TestHarness {
    pub fn new() -> Self {
        let runtime = Runtime::new().expect("Failed to create tokio runtime");
        let node = runtime.block_on(MockNode::start());
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { node, dir, runtime }
    }

    /// A txcheck Command pointed at the mock node's Miner wallet.
    pub fn cli_command(&self) -> Command {
        let mut cmd = super::txcheck_cmd();
        cmd.env("TXCHECK_RPC_URL", self.node.url("Miner"));
        cmd
    }

    pub fn run(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.cli_command().args(args).assert()
    }

    /// Runs `txcheck verify --fixture <path>` followed by `extra` args.
    pub fn verify(&self, fixture: &PathBuf, extra: &[&str]) -> assert_cmd::assert::Assert {
        self.cli_command()
            .arg("verify")
            .arg("--fixture")
            .arg(fixture)
            .args(extra)
            .assert()
    }

    pub fn write_fixture(&self, contents: &str) -> PathBuf {
        let path = self.dir.path().join("out.txt");
        std::fs::write(&path, contents).expect("Failed to write fixture");
        path
    }

    pub fn set_reply(&self, reply: NodeReply) {
        self.node.set_reply(reply);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.node.requests()
    }

    pub fn node_url(&self, wallet: &str) -> String {
        self.node.url(wallet)
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
