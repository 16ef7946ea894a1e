//! Wire types: the JSON-RPC 1.0 envelope and the `gettransaction` result schema.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Number;
use serde_json::Value;

use txcheck_core::HexId;
use txcheck_core::Input;
use txcheck_core::Output;
use txcheck_core::TransactionSnapshot;
use txcheck_core::parse_amount;

/// JSON-RPC 1.0 request as Bitcoin Core accepts it.
#[derive(Debug, Serialize)]
pub struct RpcRequest {
    pub jsonrpc: &'static str,
    pub id: String,
    pub method: String,
    pub params: Vec<Value>,
}

impl RpcRequest {
    pub fn new(id: String, method: &str, params: Vec<Value>) -> Self {
        Self {
            jsonrpc: "1.0",
            id,
            method: method.to_string(),
            params,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
    #[serde(default)]
    pub id: Option<Value>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// `gettransaction` result with `verbose=true`.
///
/// Only the fields the verifier reads are declared. Block fields and the fee
/// are optional on the wire: unconfirmed transactions have no block, and the
/// fee is only reported to the wallet that paid it.
#[derive(Debug, Deserialize)]
pub struct RawTransaction {
    pub txid: String,
    #[serde(default)]
    pub blockheight: Option<u64>,
    #[serde(default)]
    pub blockhash: Option<String>,
    #[serde(default, deserialize_with = "optional_amount")]
    pub fee: Option<Decimal>,
    pub decoded: DecodedTransaction,
}

#[derive(Debug, Deserialize)]
pub struct DecodedTransaction {
    pub vin: Vec<RawInput>,
    pub vout: Vec<RawOutput>,
}

#[derive(Debug, Deserialize)]
pub struct RawInput {
    #[serde(default)]
    pub txid: Option<String>,
    #[serde(default)]
    pub vout: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct RawOutput {
    #[serde(deserialize_with = "amount")]
    pub value: Decimal,
    #[serde(default)]
    pub n: Option<u32>,
    #[serde(rename = "scriptPubKey")]
    pub script_pub_key: RawScriptPubKey,
}

/// Bitcoin Core 22+ reports a single `address`; older releases an
/// `addresses` list. Both feed the output's candidate set.
#[derive(Debug, Deserialize)]
pub struct RawScriptPubKey {
    #[serde(default)]
    pub address: Option<AddressField>,
    #[serde(default)]
    pub addresses: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AddressField {
    One(String),
    Many(Vec<String>),
}

impl RawScriptPubKey {
    fn candidates(self) -> Vec<String> {
        let mut candidates = match self.address {
            Some(AddressField::One(address)) => vec![address],
            Some(AddressField::Many(addresses)) => addresses,
            None => Vec::new(),
        };
        for address in self.addresses.unwrap_or_default() {
            if !candidates.contains(&address) {
                candidates.push(address);
            }
        }
        candidates
    }
}

impl RawTransaction {
    /// Validates identifiers and builds the snapshot the verifier reads.
    pub fn into_snapshot(self) -> Result<TransactionSnapshot, String> {
        let transaction_id =
            HexId::parse(&self.txid).map_err(|e| format!("txid '{}': {e}", self.txid))?;
        let block_hash = self
            .blockhash
            .map(|hash| HexId::parse(&hash).map_err(|e| format!("blockhash '{hash}': {e}")))
            .transpose()?;

        let inputs = self
            .decoded
            .vin
            .into_iter()
            .map(|input| Input {
                previous_txid: input.txid,
                previous_vout: input.vout,
            })
            .collect();

        let outputs = self
            .decoded
            .vout
            .into_iter()
            .enumerate()
            .map(|(position, output)| Output {
                index: output.n.unwrap_or(position as u32),
                addresses: output.script_pub_key.candidates(),
                value: output.value,
            })
            .collect();

        Ok(TransactionSnapshot::new(
            transaction_id,
            self.blockheight,
            block_hash,
            inputs,
            outputs,
            self.fee,
        ))
    }
}

fn number_to_amount<E: serde::de::Error>(number: &Number) -> Result<Decimal, E> {
    let text = number.to_string();
    parse_amount(&text).ok_or_else(|| E::custom(format!("invalid amount {text}")))
}

fn amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Number::deserialize(deserializer)?;
    number_to_amount(&number)
}

fn optional_amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Number>::deserialize(deserializer)?
        .as_ref()
        .map(number_to_amount)
        .transpose()
}
