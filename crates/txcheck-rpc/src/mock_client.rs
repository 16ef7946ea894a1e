use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use async_trait::async_trait;
use serde_json::Value;

use crate::client::RpcTransport;
use crate::error::ClientError;

type CallRecord = Vec<(String, Vec<Value>)>;

/// What a [`MockTransport`] answers for a method.
#[derive(Debug, Clone)]
pub enum MockReply {
    Result(Value),
    RpcError { code: i64, message: String },
    Transport(String),
    Timeout { secs: u64 },
}

/// A mock implementation of [`RpcTransport`] for testing.
///
/// Replies are configured per method and every call is recorded for
/// assertions. Unconfigured methods answer with RPC error -32601.
///
/// # Example
///
/// ```ignore
/// use txcheck_rpc::{MockReply, MockTransport, NodeQueryClient, GET_TRANSACTION};
/// use serde_json::Value;
///
/// let mock = MockTransport::new();
/// mock.set_reply(GET_TRANSACTION, MockReply::Result(Value::Null));
///
/// let client = NodeQueryClient::new(mock.clone());
/// assert!(client.get_transaction(&txid).await.is_err());
/// assert_eq!(mock.call_count(GET_TRANSACTION), 1);
/// ```
#[derive(Clone, Default)]
pub struct MockTransport {
    replies: Arc<Mutex<HashMap<String, MockReply>>>,
    calls: Arc<Mutex<CallRecord>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_reply(&self, method: &str, reply: MockReply) {
        lock(&self.replies).insert(method.to_string(), reply);
    }

    pub fn calls(&self) -> CallRecord {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self, method: &str) -> usize {
        lock(&self.calls).iter().filter(|(m, _)| m == method).count()
    }

    pub fn last_call(&self, method: &str) -> Option<(String, Vec<Value>)> {
        lock(&self.calls)
            .iter()
            .rev()
            .find(|(m, _)| m == method)
            .cloned()
    }
}

#[async_trait]
impl RpcTransport for MockTransport {
    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, ClientError> {
        lock(&self.calls).push((method.to_string(), params));

        let reply = lock(&self.replies).get(method).cloned();
        match reply {
            Some(MockReply::Result(value)) => Ok(value),
            Some(MockReply::RpcError { code, message }) => Err(ClientError::Rpc { code, message }),
            Some(MockReply::Transport(message)) => Err(ClientError::Transport(message)),
            Some(MockReply::Timeout { secs }) => Err(ClientError::Timeout { secs }),
            None => Err(ClientError::Rpc {
                code: -32601,
                message: format!("Method not found: {method}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_returns_configured_reply() {
        let mock = MockTransport::new();
        mock.set_reply("getblockcount", MockReply::Result(json!(102)));

        let result = mock.call("getblockcount", vec![]).await.unwrap();
        assert_eq!(result, json!(102));
    }

    #[tokio::test]
    async fn test_mock_unconfigured_method_errors() {
        let mock = MockTransport::new();
        let err = mock.call("unknown", vec![]).await.unwrap_err();
        assert!(matches!(err, ClientError::Rpc { code: -32601, .. }));
    }

    #[tokio::test]
    async fn test_mock_records_calls_across_clones() {
        let mock = MockTransport::new();
        let shared = mock.clone();
        let _ = shared.call("a", vec![json!(1)]).await;
        let _ = shared.call("b", vec![]).await;
        let _ = shared.call("a", vec![json!(2)]).await;

        assert_eq!(mock.calls().len(), 3);
        assert_eq!(mock.call_count("a"), 2);
        assert_eq!(mock.last_call("a"), Some(("a".to_string(), vec![json!(2)])));
    }
}
