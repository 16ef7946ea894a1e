use thiserror::Error;
use txcheck_common::ErrorCategory;

/// Bitcoin Core: invalid address or key, also returned for unknown wallet txids.
const RPC_INVALID_ADDRESS_OR_KEY: i64 = -5;
/// Bitcoin Core: requested wallet does not exist or is not loaded.
const RPC_WALLET_NOT_FOUND: i64 = -18;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("Failed to reach node: {0}")]
    Transport(String),

    #[error("Node did not answer within {secs}s")]
    Timeout { secs: u64 },

    #[error("Node returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Node response is not valid JSON: {0}")]
    MalformedJson(String),

    #[error("Node response is JSON but not a JSON-RPC response: {0}")]
    InvalidEnvelope(String),

    #[error("RPC error ({code}): {message}")]
    Rpc { code: i64, message: String },

    #[error("Node returned a null result for transaction {txid}")]
    NullResult { txid: String },

    #[error("Node response does not match the transaction schema: {0}")]
    InvalidResponse(String),

    #[error("Node returned transaction {returned}, expected {requested}")]
    IdentityMismatch { requested: String, returned: String },
}

impl ClientError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ClientError::Timeout { .. } => ErrorCategory::Timeout,
            ClientError::IdentityMismatch { .. } => ErrorCategory::Mismatch,
            _ => ErrorCategory::External,
        }
    }

    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ClientError::Transport(_) => {
                Some("Check that the node is running and --rpc-url points at its RPC port.")
            }
            ClientError::Timeout { .. } => {
                Some("The node may be busy. Raise --timeout-secs or pass 0 to wait indefinitely.")
            }
            ClientError::Http { status: 401, .. } => {
                Some("Check --rpc-user and --rpc-password against the node's rpcauth settings.")
            }
            ClientError::InvalidEnvelope(_) => {
                Some("Something other than the node answered. Check that --rpc-url points at the RPC port.")
            }
            ClientError::Http { status: 404, .. } => {
                Some("The RPC path was not found. Check the /wallet/<name> part of --rpc-url.")
            }
            ClientError::Rpc {
                code: RPC_INVALID_ADDRESS_OR_KEY,
                ..
            } => Some("The wallet does not know this transaction. Query the wallet that sent it."),
            ClientError::Rpc {
                code: RPC_WALLET_NOT_FOUND,
                ..
            } => Some("Load the wallet on the node or fix the wallet name in --rpc-url."),
            ClientError::IdentityMismatch { .. } => {
                Some("The endpoint answered for another transaction. Check --rpc-url and the fixture's first line.")
            }
            _ => None,
        }
    }
}
