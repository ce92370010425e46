//! Structured logging for sublimate
//!
//! Every diagnostic goes to standard error so that standard output carries
//! nothing but the executed command's output, which keeps the tool usable in
//! pipes.
//!
//! ## Usage
//!
//! ```rust
//! use sublimate::logger::{self, LogTag};
//!
//! logger::error(LogTag::System, "Run failed");
//! logger::warning(LogTag::Rpc, "Failed to fetch gas price, retrying at next tick");
//! logger::info(LogTag::Gas, "Current gas price 12.00 gwei");
//! logger::debug(LogTag::Rpc, "Dialing endpoint"); // Only if --debug-rpc
//! logger::verbose(LogTag::Poller, "Tick #3"); // Only if --verbose
//! ```
//!
//! ## Initialization
//!
//! Call once at startup with the configuration built from CLI flags:
//! ```rust
//! use sublimate::logger::{self, LoggerConfig};
//!
//! logger::init(LoggerConfig::default());
//! ```

mod config;
mod core;
mod format;
mod levels;
mod tags;

pub use config::{get_logger_config, set_logger_config, LoggerConfig};
pub use levels::LogLevel;
pub use tags::LogTag;

/// Install the logger configuration
///
/// Without a call to `init` the logger runs with defaults (info and above).
pub fn init(config: LoggerConfig) {
    set_logger_config(config);
}

/// Log at ERROR level (always shown)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level
///
/// Shown unless filtered by the minimum level. Transient RPC failures are
/// reported here.
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (standard operations, hidden by --quiet)
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level
///
/// Only shown when the matching --debug-<tag> flag is provided.
///
/// # Example
/// ```rust
/// use sublimate::logger::{self, LogTag};
///
/// // Only shown with --debug-rpc
/// logger::debug(LogTag::Rpc, "eth_gasPrice returned 0x3b9aca00");
/// ```
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level (only with --verbose)
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}
