//! Immutable run configuration
//!
//! Built once from the CLI in `arguments`, validated, and then only read by
//! the poller.

use crate::command::Shell;
use crate::errors::ConfigError;
use std::time::Duration;

/// Default execution threshold in gwei
pub const DEFAULT_THRESHOLD_GWEI: f64 = 1.0;

/// Default seconds between price checks
pub const DEFAULT_INTERVAL_SECS: u64 = 60;

/// Per-call bound on `eth_gasPrice`
pub const DEFAULT_RPC_TIMEOUT_SECS: u64 = 5;

/// Environment variable consulted when --rpc is not given
pub const RPC_URL_ENV: &str = "RPC_URL";

#[derive(Debug, Clone, PartialEq)]
pub struct PollerConfig {
    pub endpoint: String,
    pub threshold_gwei: f64,
    pub interval: Duration,
    pub rpc_timeout: Duration,
    pub command: String,
    pub shell: Shell,
}

impl PollerConfig {
    /// Validate and build a configuration with default timeout and shell
    pub fn new(
        command: impl Into<String>,
        endpoint: impl Into<String>,
        threshold_gwei: f64,
        interval_secs: u64,
    ) -> Result<Self, ConfigError> {
        let command = command.into();
        if command.trim().is_empty() {
            return Err(ConfigError::MissingCommand);
        }

        let endpoint = endpoint.into();
        if endpoint.trim().is_empty() {
            return Err(ConfigError::MissingEndpoint);
        }

        if !threshold_gwei.is_finite() || threshold_gwei < 0.0 {
            return Err(ConfigError::InvalidThreshold(threshold_gwei));
        }

        if interval_secs == 0 {
            return Err(ConfigError::InvalidInterval(interval_secs));
        }

        Ok(Self {
            endpoint,
            threshold_gwei,
            interval: Duration::from_secs(interval_secs),
            rpc_timeout: Duration::from_secs(DEFAULT_RPC_TIMEOUT_SECS),
            command,
            shell: Shell::platform_default(),
        })
    }

    pub fn with_rpc_timeout(mut self, timeout_secs: u64) -> Result<Self, ConfigError> {
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(timeout_secs));
        }
        self.rpc_timeout = Duration::from_secs(timeout_secs);
        Ok(self)
    }

    pub fn with_shell(mut self, shell: Shell) -> Self {
        self.shell = shell;
        self
    }
}
