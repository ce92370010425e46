//! Logger configuration and per-tag debug switches
//!
//! The configuration lives in a global so that any module can log without
//! threading a handle around. It is written once from the CLI flags in
//! `main` and only read afterwards.

use super::levels::LogLevel;
use super::tags::LogTag;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::RwLock;

#[derive(Debug, Clone, PartialEq)]
pub struct LoggerConfig {
    /// Anything above this level is dropped (errors always pass)
    pub min_level: LogLevel,
    /// Tags with `--debug-<tag>` enabled
    pub debug_tags: HashSet<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_tags: HashSet::new(),
        }
    }
}

impl LoggerConfig {
    pub fn with_debug_tag(mut self, tag: LogTag) -> Self {
        self.debug_tags.insert(tag.to_debug_key());
        if self.min_level < LogLevel::Debug {
            self.min_level = LogLevel::Debug;
        }
        self
    }

    pub fn verbose(mut self) -> Self {
        self.min_level = LogLevel::Verbose;
        self
    }

    pub fn quiet(mut self) -> Self {
        self.min_level = LogLevel::Warning;
        self.debug_tags.clear();
        self
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

pub fn get_logger_config() -> LoggerConfig {
    match LOGGER_CONFIG.read() {
        Ok(config) => config.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

pub fn set_logger_config(config: LoggerConfig) {
    match LOGGER_CONFIG.write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

pub fn is_debug_enabled_for_tag(config: &LoggerConfig, tag: &LogTag) -> bool {
    config.debug_tags.contains(&tag.to_debug_key())
}
