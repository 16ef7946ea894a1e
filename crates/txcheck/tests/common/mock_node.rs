//! Mock node for testing the CLI without bitcoind
//!
//! The MockNode listens on a local TCP port, speaks just enough HTTP/1.1 to
//! accept one JSON-RPC POST per connection, and answers with a configured
//! reply. Every request is recorded with the headers the node would
//! authenticate on.

#![allow(dead_code)]

use serde_json::Value;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tokio::sync::oneshot;

/// Recorded request for test verification
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub content_type: Option<String>,
    pub authorization: Option<String>,
    pub body: Value,
}

impl RecordedRequest {
    pub fn method(&self) -> Option<&str> {
        self.body.get("method").and_then(Value::as_str)
    }
}

/// Configuration for how the mock should respond
#[derive(Debug, Clone)]
pub enum NodeReply {
    /// `{"result": value, "error": null}` with HTTP 200
    Result(Value),
    /// JSON-RPC error object with HTTP 500, as bitcoind does
    RpcError { code: i64, message: String },
    /// Arbitrary status and body
    Status { status: u16, body: String },
    /// HTTP 200 with a body that is not JSON
    Raw(String),
    /// Never answer (for timeout tests)
    Hang,
}

pub struct MockNode {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    reply: Arc<Mutex<NodeReply>>,
}

impl MockNode {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock node");
        let addr = listener.local_addr().expect("Failed to read local addr");

        let requests = Arc::new(Mutex::new(Vec::new()));
        let reply = Arc::new(Mutex::new(NodeReply::Result(Value::Null)));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let task_requests = Arc::clone(&requests);
        let task_reply = Arc::clone(&reply);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    accepted = listener.accept() => {
                        let Ok((stream, _)) = accepted else { continue };
                        let requests = Arc::clone(&task_requests);
                        let reply = task_reply.lock().unwrap().clone();
                        tokio::spawn(handle_connection(stream, requests, reply));
                    }
                }
            }
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            requests,
            reply,
        }
    }

    pub fn url(&self, wallet: &str) -> String {
        format!("http://{}/wallet/{}", self.addr, wallet)
    }

    pub fn set_reply(&self, reply: NodeReply) {
        *self.reply.lock().unwrap() = reply;
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for MockNode {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn handle_connection(
    mut stream: TcpStream,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    reply: NodeReply,
) {
    let Some(request) = read_request(&mut stream).await else {
        return;
    };
    let id = request.body.get("id").cloned().unwrap_or(Value::Null);
    requests.lock().unwrap().push(request);

    let (status, body) = match reply {
        NodeReply::Result(result) => (
            200,
            json!({ "result": result, "error": null, "id": id }).to_string(),
        ),
        NodeReply::RpcError { code, message } => (
            500,
            json!({ "result": null, "error": { "code": code, "message": message }, "id": id })
                .to_string(),
        ),
        NodeReply::Status { status, body } => (status, body),
        NodeReply::Raw(body) => (200, body),
        NodeReply::Hang => {
            tokio::time::sleep(Duration::from_secs(60)).await;
            return;
        }
    };

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason(status),
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

async fn read_request(stream: &mut TcpStream) -> Option<RecordedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos;
        }
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let path = lines.next()?.split_whitespace().nth(1)?.to_string();

    let mut content_type = None;
    let mut authorization = None;
    let mut content_length = 0usize;
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim().to_string();
        match name.trim().to_ascii_lowercase().as_str() {
            "content-type" => content_type = Some(value),
            "authorization" => authorization = Some(value),
            "content-length" => content_length = value.parse().unwrap_or(0),
            _ => {}
        }
    }

    let body_start = header_end + 4;
    while buf.len() < body_start + content_length {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let end = buf.len().min(body_start + content_length);
    let body = serde_json::from_slice(&buf[body_start..end]).unwrap_or(Value::Null);

    Some(RecordedRequest {
        path,
        content_type,
        authorization,
        body,
    })
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}
