use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::debug;
use tracing::info;
use tracing::warn;

use txcheck_core::HexId;
use txcheck_core::TransactionSnapshot;

use crate::config::RpcConfig;
use crate::error::ClientError;
use crate::types::RawTransaction;
use crate::types::RpcRequest;
use crate::types::RpcResponse;

pub const GET_TRANSACTION: &str = "gettransaction";

const MAX_ERROR_BODY: usize = 512;

static REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// A single JSON-RPC round trip.
///
/// Implementations return the `result` member as-is, `Value::Null` included,
/// and map an `error` member to [`ClientError::Rpc`].
#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, ClientError>;
}

/// JSON-RPC 1.0 over HTTP POST with Basic authentication.
pub struct HttpTransport {
    client: reqwest::Client,
    config: RpcConfig,
}

impl HttpTransport {
    pub fn new(config: RpcConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &RpcConfig {
        &self.config
    }

    fn map_send_error(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            let secs = self.config.timeout().map(|t| t.as_secs()).unwrap_or_default();
            ClientError::Timeout { secs }
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, ClientError> {
        let id = format!("txcheck-{}", REQUEST_ID.fetch_add(1, Ordering::SeqCst));
        let request = RpcRequest::new(id, method, params);
        let body = serde_json::to_string(&request)
            .map_err(|e| ClientError::Transport(format!("failed to encode request: {e}")))?;

        debug!(url = %self.config.url(), method, id = %request.id, "Sending RPC request");

        let response = self
            .client
            .post(self.config.url())
            .header(CONTENT_TYPE, "text/plain")
            .header(AUTHORIZATION, self.config.basic_auth_header())
            .body(body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.map_send_error(e))?;

        let parsed = decode_response(status, &text)?;

        if let Some(error) = parsed.error {
            return Err(ClientError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        Ok(parsed.result.unwrap_or(Value::Null))
    }
}

/// Bitcoin Core answers RPC errors with HTTP 404/500 and a JSON body, so a
/// decodable body takes precedence over the status line.
fn decode_response(status: StatusCode, text: &str) -> Result<RpcResponse, ClientError> {
    let decoded = serde_json::from_str::<Value>(text)
        .map_err(|e| ClientError::MalformedJson(e.to_string()))
        .and_then(|value| {
            serde_json::from_value::<RpcResponse>(value)
                .map_err(|e| ClientError::InvalidEnvelope(e.to_string()))
        });
    match decoded {
        Err(e) if !status.is_success() => {
            debug!(status = status.as_u16(), error = %e, "Undecodable error body");
            Err(ClientError::Http {
                status: status.as_u16(),
                body: truncate(text, MAX_ERROR_BODY),
            })
        }
        other => other,
    }
}

fn truncate(text: &str, max: usize) -> String {
    let trimmed = text.trim();
    match trimmed.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

/// Looks up wallet transactions through an [`RpcTransport`].
pub struct NodeQueryClient<T: RpcTransport> {
    transport: T,
}

impl<T: RpcTransport> NodeQueryClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Fetches `txid` with `gettransaction <txid> null true`.
    ///
    /// The answer is rejected before any schema parsing when it is null or
    /// names a different transaction.
    pub async fn get_transaction(&self, txid: &HexId) -> Result<TransactionSnapshot, ClientError> {
        let params = vec![
            Value::String(txid.as_str().to_string()),
            Value::Null,
            Value::Bool(true),
        ];
        let result = self.transport.call(GET_TRANSACTION, params).await?;

        if result.is_null() {
            warn!(txid = %txid, "Node returned a null result");
            return Err(ClientError::NullResult {
                txid: txid.to_string(),
            });
        }

        let returned = result
            .get("txid")
            .and_then(Value::as_str)
            .ok_or_else(|| ClientError::InvalidResponse("missing string field 'txid'".to_string()))?;
        if returned != txid.as_str() {
            warn!(requested = %txid, returned, "Node answered for a different transaction");
            return Err(ClientError::IdentityMismatch {
                requested: txid.to_string(),
                returned: returned.to_string(),
            });
        }

        let raw: RawTransaction = serde_json::from_value(result)
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        let snapshot = raw.into_snapshot().map_err(ClientError::InvalidResponse)?;

        info!(
            txid = %txid,
            inputs = snapshot.inputs().len(),
            outputs = snapshot.outputs().len(),
            confirmed = snapshot.block_height().is_some(),
            "Fetched transaction snapshot"
        );
        Ok(snapshot)
    }
}
