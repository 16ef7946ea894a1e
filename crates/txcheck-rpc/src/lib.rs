#![deny(clippy::all)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! JSON-RPC access to a node's wallet.
//!
//! [`NodeQueryClient`] performs the single `gettransaction` lookup a
//! verification run needs and validates the answer into a
//! [`txcheck_core::TransactionSnapshot`]. The wire is abstracted behind
//! [`RpcTransport`]: [`HttpTransport`] talks to a real node, [`MockTransport`]
//! serves canned replies in tests.

mod client;
pub mod config;
mod error;
mod mock_client;
mod types;

pub use client::GET_TRANSACTION;
pub use client::HttpTransport;
pub use client::NodeQueryClient;
pub use client::RpcTransport;
pub use config::RpcConfig;
pub use error::ClientError;
pub use mock_client::MockReply;
pub use mock_client::MockTransport;
pub use types::RawTransaction;
pub use types::RpcErrorObject;
pub use types::RpcRequest;
pub use types::RpcResponse;

pub type Result<T> = std::result::Result<T, ClientError>;
