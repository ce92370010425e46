//! Command-line surface for sublimate
//!
//! Flags are parsed with clap; the endpoint falls back to `RPC_URL` (which
//! `main` may have populated from a `.env` file). Everything after the first
//! positional argument belongs to the command, hyphenated words included.
//! Single-dash long flags (`-gwei 0.5`, `-rpc=URL`) are accepted as well.

use crate::command::Shell;
use crate::config::{
    PollerConfig, DEFAULT_INTERVAL_SECS, DEFAULT_RPC_TIMEOUT_SECS, DEFAULT_THRESHOLD_GWEI,
    RPC_URL_ENV,
};
use crate::errors::ConfigError;
use crate::logger::{LogTag, LoggerConfig};
use clap::{CommandFactory, Parser};
use std::ffi::OsString;

/// Long flags that take a value
const VALUE_FLAGS: &[&str] = &["rpc", "gwei", "interval", "rpc-timeout", "shell"];

/// Long flags that are plain switches
const SWITCH_FLAGS: &[&str] = &[
    "debug-rpc",
    "debug-poller",
    "debug-command",
    "verbose",
    "quiet",
    "help",
    "version",
];

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "sublimate", version)]
#[command(about = "Run a command once the gas price drops to a target")]
#[command(after_help = concat!(
    "The RPC endpoint falls back to the RPC_URL environment variable.\n",
    "The command's stdout is relayed to stdout; all diagnostics go to stderr."
))]
pub struct Args {
    /// Ethereum RPC URL (http, ws or ipc)
    #[arg(long, value_name = "URL")]
    pub rpc: Option<String>,

    /// Gas price threshold in gwei to execute the command at
    #[arg(long, default_value_t = DEFAULT_THRESHOLD_GWEI, value_name = "GWEI")]
    pub gwei: f64,

    /// Seconds between price checks
    #[arg(long, default_value_t = DEFAULT_INTERVAL_SECS, value_name = "SECONDS")]
    pub interval: u64,

    /// Seconds to wait for each RPC call
    #[arg(long, default_value_t = DEFAULT_RPC_TIMEOUT_SECS, value_name = "SECONDS")]
    pub rpc_timeout: u64,

    /// Shell used to run the command (default: sh, or cmd on Windows)
    #[arg(long, value_name = "PROGRAM")]
    pub shell: Option<String>,

    /// Debug logging for RPC connections
    #[arg(long)]
    pub debug_rpc: bool,

    /// Debug logging for the poll loop
    #[arg(long)]
    pub debug_poller: bool,

    /// Debug logging for command execution
    #[arg(long)]
    pub debug_command: bool,

    /// Log everything, including per-tick traces
    #[arg(long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(long)]
    pub quiet: bool,

    /// Command to run once the threshold is met (joined with spaces)
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

impl Args {
    /// Parse argv, accepting single-dash long flags before the command
    pub fn try_parse_cli<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_flags(args))
    }

    /// Command words joined into the single string handed to the shell
    pub fn command_line(&self) -> String {
        self.command.join(" ")
    }

    /// Endpoint from --rpc, falling back to the `RPC_URL` lookup
    pub fn resolve_endpoint<F>(&self, env_lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.rpc
            .clone()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| env_lookup(RPC_URL_ENV).filter(|url| !url.trim().is_empty()))
    }

    /// Build the immutable run configuration
    pub fn into_config<F>(self, env_lookup: F) -> Result<PollerConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let command = self.command_line();
        if command.trim().is_empty() {
            return Err(ConfigError::MissingCommand);
        }
        let endpoint = self
            .resolve_endpoint(env_lookup)
            .ok_or(ConfigError::MissingEndpoint)?;

        let mut config = PollerConfig::new(command, endpoint, self.gwei, self.interval)?
            .with_rpc_timeout(self.rpc_timeout)?;
        if let Some(program) = self.shell {
            config = config.with_shell(Shell::from_program(program));
        }
        Ok(config)
    }

    pub fn logger_config(&self) -> LoggerConfig {
        if self.quiet {
            return LoggerConfig::default().quiet();
        }

        let mut config = LoggerConfig::default();
        if self.debug_rpc {
            config = config.with_debug_tag(LogTag::Rpc);
        }
        if self.debug_poller {
            config = config
                .with_debug_tag(LogTag::Poller)
                .with_debug_tag(LogTag::Gas);
        }
        if self.debug_command {
            config = config.with_debug_tag(LogTag::Command);
        }
        if self.verbose {
            config = config.verbose();
        }
        config
    }
}

/// Rewrite `-flag` / `-flag=value` to `--flag` / `--flag=value`
///
/// Only tokens ahead of the first command word are touched, and only names
/// that are real long flags, so `-la` inside the command stays as written.
pub fn normalize_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut out: Vec<OsString> = args.next().into_iter().collect();

    while let Some(arg) = args.next() {
        let text = match arg.to_str() {
            Some(text) => text.to_string(),
            None => {
                out.push(arg);
                break;
            }
        };

        if text == "--" || !text.starts_with('-') || text == "-" {
            out.push(arg);
            break;
        }

        let body = text.trim_start_matches('-');
        let (name, inline_value) = match body.split_once('=') {
            Some((name, _)) => (name, true),
            None => (body, false),
        };

        if VALUE_FLAGS.contains(&name) {
            out.push(OsString::from(format!("--{}", body)));
            if !inline_value {
                if let Some(value) = args.next() {
                    out.push(value);
                }
            }
        } else if SWITCH_FLAGS.contains(&name) {
            out.push(OsString::from(format!("--{}", body)));
        } else {
            // Short flags like -h/-V; clap decides what they mean
            out.push(arg);
        }
    }

    out.extend(args);
    out
}

/// Usage line printed when the command or endpoint is missing
pub fn usage() -> String {
    Args::command().render_usage().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::LogLevel;
    use std::time::Duration;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_with_rpc(key: &str) -> Option<String> {
        (key == RPC_URL_ENV).then(|| "http://env-node:8545".to_string())
    }

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_cli(args.iter().copied()).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["sublimate", "echo", "hi"]);
        assert_eq!(args.gwei, 1.0);
        assert_eq!(args.interval, 60);
        assert_eq!(args.rpc_timeout, 5);
        assert_eq!(args.command_line(), "echo hi");
    }

    #[test]
    fn test_command_keeps_hyphenated_words() {
        let args = parse(&["sublimate", "--gwei", "3.5", "ls", "-la", "--color", "/tmp"]);
        assert_eq!(args.gwei, 3.5);
        assert_eq!(args.command_line(), "ls -la --color /tmp");
    }

    #[test]
    fn test_flags_after_command_belong_to_command() {
        let args = parse(&["sublimate", "cast", "send", "--gwei", "9"]);
        assert_eq!(args.gwei, 1.0);
        assert_eq!(args.command_line(), "cast send --gwei 9");
    }

    #[test]
    fn test_single_dash_long_flags() {
        let args = parse(&["sublimate", "-gwei", "0.5", "-interval", "5", "echo", "hi"]);
        assert_eq!(args.gwei, 0.5);
        assert_eq!(args.interval, 5);
        assert_eq!(args.command_line(), "echo hi");

        let args = parse(&["sublimate", "-rpc", "http://x", "echo", "hi"]);
        assert_eq!(args.rpc.as_deref(), Some("http://x"));
        assert_eq!(args.command_line(), "echo hi");
    }

    #[test]
    fn test_single_dash_inline_values_and_switches() {
        let args = parse(&["sublimate", "-rpc=ws://n:8546", "-quiet", "-gwei=2", "ls", "-la"]);
        assert_eq!(args.rpc.as_deref(), Some("ws://n:8546"));
        assert!(args.quiet);
        assert_eq!(args.gwei, 2.0);
        assert_eq!(args.command_line(), "ls -la");
    }

    #[test]
    fn test_normalize_leaves_command_words_alone() {
        let out = normalize_flags(["sublimate", "--gwei", "-1", "cast", "-rpc", "-gwei"]);
        let out: Vec<_> = out.iter().map(|a| a.to_str().unwrap()).collect();
        assert_eq!(out, ["sublimate", "--gwei", "-1", "cast", "-rpc", "-gwei"]);
    }

    #[test]
    fn test_env_fallback() {
        let config = parse(&["sublimate", "true"]).into_config(env_with_rpc).unwrap();
        assert_eq!(config.endpoint, "http://env-node:8545");
    }

    #[test]
    fn test_flag_overrides_env() {
        let config = parse(&["sublimate", "--rpc", "ws://flag-node:8546", "true"])
            .into_config(env_with_rpc)
            .unwrap();
        assert_eq!(config.endpoint, "ws://flag-node:8546");
    }

    #[test]
    fn test_missing_command() {
        let err = parse(&["sublimate", "--rpc", "http://x"]).into_config(no_env);
        assert_eq!(err, Err(ConfigError::MissingCommand));
    }

    #[test]
    fn test_missing_endpoint() {
        let err = parse(&["sublimate", "echo"]).into_config(no_env);
        assert_eq!(err, Err(ConfigError::MissingEndpoint));

        let err = parse(&["sublimate", "--rpc", "", "echo"]).into_config(no_env);
        assert_eq!(err, Err(ConfigError::MissingEndpoint));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = parse(&["sublimate", "--interval", "0", "--rpc", "http://x", "echo"])
            .into_config(no_env);
        assert_eq!(err, Err(ConfigError::InvalidInterval(0)));
    }

    #[test]
    fn test_full_config() {
        let config = parse(&[
            "sublimate",
            "--rpc",
            "http://node:8545",
            "--gwei",
            "0.25",
            "--interval",
            "15",
            "--rpc-timeout",
            "2",
            "--shell",
            "bash",
            "forge",
            "script",
            "Deploy",
        ])
        .into_config(no_env)
        .unwrap();

        assert_eq!(config.threshold_gwei, 0.25);
        assert_eq!(config.interval, Duration::from_secs(15));
        assert_eq!(config.rpc_timeout, Duration::from_secs(2));
        assert_eq!(config.shell, Shell::from_program("bash"));
        assert_eq!(config.command, "forge script Deploy");
    }

    #[test]
    fn test_logger_flags() {
        let config = parse(&["sublimate", "--debug-rpc", "true"]).logger_config();
        assert_eq!(config.min_level, LogLevel::Debug);
        assert!(config.debug_tags.contains("rpc"));

        let config = parse(&["sublimate", "--quiet", "--debug-rpc", "true"]).logger_config();
        assert_eq!(config.min_level, LogLevel::Warning);
        assert!(config.debug_tags.is_empty());

        let config = parse(&["sublimate", "--verbose", "true"]).logger_config();
        assert_eq!(config.min_level, LogLevel::Verbose);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Args::try_parse_from(["sublimate", "--verbose", "--quiet", "true"]).is_err());
    }

    #[test]
    fn test_usage_mentions_command() {
        assert!(usage().contains("sublimate"));
        assert!(usage().contains("COMMAND"));
    }
}
