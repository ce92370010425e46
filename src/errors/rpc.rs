//! Node connectivity errors
//!
//! Every variant is transient once the poll loop is running: it is logged,
//! flips the loop into reconnect mode, and is retried on the next tick.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RpcError {
    #[error("dial {endpoint}: {reason}")]
    Dial { endpoint: String, reason: String },

    #[error("rpc call failed: {0}")]
    Call(String),

    #[error("rpc call timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

impl From<alloy::transports::RpcError<alloy::transports::TransportErrorKind>> for RpcError {
    fn from(e: alloy::transports::RpcError<alloy::transports::TransportErrorKind>) -> Self {
        RpcError::Call(e.to_string())
    }
}
