//! Core logging implementation with automatic filtering
//!
//! This module contains the central logging logic that:
//! - Checks if a log should be displayed based on level and tag
//! - Delegates to the format module for writing

use super::config::{get_logger_config, is_debug_enabled_for_tag, LoggerConfig};
use super::levels::LogLevel;
use super::tags::LogTag;

/// Check if a log message should be displayed
///
/// Filtering rules:
/// 1. Errors are always shown
/// 2. Check against minimum log level threshold
/// 3. Debug level requires --debug-<tag> for that tag
/// 4. Verbose level requires --verbose
pub fn should_log(config: &LoggerConfig, tag: &LogTag, level: LogLevel) -> bool {
    // Rule 1
    if level == LogLevel::Error {
        return true;
    }

    // Rule 2
    if level > config.min_level {
        return false;
    }

    // Rule 3
    if level == LogLevel::Debug {
        return config.min_level == LogLevel::Verbose || is_debug_enabled_for_tag(config, tag);
    }

    // Rule 4: Verbose passed rule 2, so --verbose is on
    true
}

pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    let config = get_logger_config();
    if !should_log(&config, &tag, level) {
        return;
    }

    super::format::format_and_log(tag, level, message);
}
