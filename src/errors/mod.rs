//! Error taxonomy for sublimate
//!
//! Three families of failures exist:
//! - Configuration problems found while resolving CLI input (`ConfigError`)
//! - Node connectivity problems (`RpcError`), transient once the loop is running
//! - Terminal outcomes of the run loop (`SublimateError`)

use thiserror::Error;

pub mod rpc;
pub use rpc::RpcError;

// =============================================================================
// MAIN ERROR TYPE - returned by the run loop
// =============================================================================

#[derive(Error, Debug)]
pub enum SublimateError {
    /// Initial dial failed, the loop was never entered
    #[error("dialing RPC: {0}")]
    Connect(#[source] RpcError),

    /// The shell exited with a non-zero status. `output` holds whatever the
    /// command wrote to stdout before failing.
    #[error("failed to execute command `{command}` ({})", exit_code_label(.code))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        output: Vec<u8>,
    },

    /// The shell process could not be started at all
    #[error("failed to spawn `{shell}` for command `{command}`: {source}")]
    Spawn {
        shell: String,
        command: String,
        #[source]
        source: std::io::Error,
    },
}

impl SublimateError {
    /// Output captured from the command before it failed, if any
    pub fn partial_output(&self) -> Option<&[u8]> {
        match self {
            SublimateError::CommandFailed { output, .. } => Some(output),
            _ => None,
        }
    }

    /// Whether the error came from the command rather than the node
    pub fn is_execution_error(&self) -> bool {
        matches!(
            self,
            SublimateError::CommandFailed { .. } | SublimateError::Spawn { .. }
        )
    }
}

fn exit_code_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    }
}

// =============================================================================
// CONFIGURATION ERROR TYPES
// =============================================================================

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("no command given")]
    MissingCommand,

    #[error("no RPC endpoint given (use --rpc or set RPC_URL)")]
    MissingEndpoint,

    #[error("gas threshold must be a finite, non-negative number of gwei (got {0})")]
    InvalidThreshold(f64),

    #[error("poll interval must be at least 1 second (got {0})")]
    InvalidInterval(u64),

    #[error("RPC timeout must be at least 1 second (got {0})")]
    InvalidTimeout(u64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failure_keeps_partial_output() {
        let err = SublimateError::CommandFailed {
            command: "false".to_string(),
            code: Some(1),
            output: b"partial".to_vec(),
        };

        assert_eq!(err.partial_output(), Some(&b"partial"[..]));
        assert!(err.is_execution_error());
        assert_eq!(
            err.to_string(),
            "failed to execute command `false` (exit status 1)"
        );
    }

    #[test]
    fn test_connect_error_is_not_execution_error() {
        let err = SublimateError::Connect(RpcError::Dial {
            endpoint: "http://127.0.0.1:1".to_string(),
            reason: "connection refused".to_string(),
        });

        assert!(!err.is_execution_error());
        assert!(err.partial_output().is_none());
        assert!(err.to_string().starts_with("dialing RPC: "));
    }

    #[test]
    fn test_signal_termination_label() {
        let err = SublimateError::CommandFailed {
            command: "sleep 100".to_string(),
            code: None,
            output: Vec::new(),
        };

        assert!(err.to_string().contains("terminated by signal"));
    }
}
