#![allow(dead_code)]
#![allow(unused_imports)]

pub mod mock_node;
pub mod test_harness;

pub use mock_node::{MockNode, NodeReply, RecordedRequest};
pub use test_harness::TestHarness;

use assert_cmd::Command;
use serde_json::{Value, json};

pub const TXID: &str = "9f8e7d6c5b4a39281706f5e4d3c2b1a09f8e7d6c5b4a39281706f5e4d3c2b1a0";
pub const OTHER_TXID: &str = "0000000000000000000000000000000000000000000000000000000000000001";
pub const BLOCK_HASH: &str = "11223344556677889900aabbccddeeff11223344556677889900aabbccddeeff";
pub const PREV_TXID: &str = "abababababababababababababababababababababababababababababababab";

pub const MINER_ADDRESS: &str = "bcrt1qminer";
pub const TRADER_ADDRESS: &str = "bcrt1qtrader";
pub const CHANGE_ADDRESS: &str = "bcrt1qchange";

/// `alice:password`
pub const DEFAULT_AUTH: &str = "Basic YWxpY2U6cGFzc3dvcmQ=";

/// A txcheck command with an environment free of the caller's settings.
pub fn txcheck_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("txcheck"));
    for key in [
        "TXCHECK_RPC_URL",
        "TXCHECK_RPC_USER",
        "TXCHECK_RPC_PASSWORD",
        "TXCHECK_RPC_TIMEOUT",
        "TXCHECK_FIXTURE",
        "TXCHECK_LOG",
        "TXCHECK_LOG_FORMAT",
        "TXCHECK_LOG_STREAM",
        "RUST_LOG",
    ] {
        cmd.env_remove(key);
    }
    cmd.env("NO_COLOR", "1");
    cmd
}

pub fn fixture(lines: [&str; 10]) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Fixture matching [`node_result`].
pub fn standard_fixture() -> String {
    fixture([
        TXID,
        MINER_ADDRESS,
        "50",
        TRADER_ADDRESS,
        "20",
        CHANGE_ADDRESS,
        "29.99999859",
        "-0.00000141",
        "102",
        BLOCK_HASH,
    ])
}

pub fn output(n: u32, address: &str, value: Value) -> Value {
    json!({
        "value": value,
        "n": n,
        "scriptPubKey": { "address": address, "type": "witness_v0_keyhash" }
    })
}

pub fn input(vout: u32) -> Value {
    json!({ "txid": PREV_TXID, "vout": vout, "sequence": 4294967293u64 })
}

/// `gettransaction` result for [`TXID`] with the given inputs, outputs and fee.
pub fn transaction(vin: Vec<Value>, vout: Vec<Value>, fee: Value) -> Value {
    json!({
        "amount": 0,
        "fee": fee,
        "confirmations": 1,
        "blockhash": BLOCK_HASH,
        "blockheight": 102,
        "txid": TXID,
        "decoded": { "txid": TXID, "vin": vin, "vout": vout }
    })
}

/// `gettransaction` result matching [`standard_fixture`].
pub fn node_result() -> Value {
    transaction(
        vec![input(0)],
        vec![
            output(0, TRADER_ADDRESS, json!(20.0)),
            output(1, CHANGE_ADDRESS, json!(29.99999859)),
        ],
        json!(-0.00000141),
    )
}

pub fn parse_stdout_json(stdout: &[u8]) -> Value {
    serde_json::from_slice(stdout).expect("stdout is not JSON")
}
