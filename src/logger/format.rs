//! Log formatting and output with ANSI colors
//!
//! Handles:
//! - Colorized tag and level columns when stderr is a terminal
//! - Plain aligned columns when stderr is redirected
//! - Writing to standard error, so stdout stays reserved for command output
//! - Broken pipe handling for piped commands

use super::levels::LogLevel;
use super::tags::LogTag;
use chrono::Local;
use colored::*;
use std::io::{stderr, ErrorKind, IsTerminal, Write};

/// Log format widths for alignment
const TAG_WIDTH: usize = 8;
const LEVEL_WIDTH: usize = 7;

/// Format and output a log message
pub fn format_and_log(tag: LogTag, level: LogLevel, message: &str) {
    let time = Local::now().format("%H:%M:%S").to_string();
    if !stderr().is_terminal() {
        print_stderr_safe(&format!("{} {}", time, plain_line(tag, level, message)));
        return;
    }

    let line = format!(
        "{} [{}] [{}] {}",
        time.dimmed(),
        format_tag(&tag),
        format_level(level),
        format_message(level, message)
    );
    print_stderr_safe(&line);
}

/// Plain, uncolored rendering of a log line (without timestamp)
pub fn plain_line(tag: LogTag, level: LogLevel, message: &str) -> String {
    format!(
        "[{:<tag_width$}] [{:<level_width$}] {}",
        tag.to_plain_string(),
        level.as_str(),
        message,
        tag_width = TAG_WIDTH,
        level_width = LEVEL_WIDTH
    )
}

fn format_tag(tag: &LogTag) -> ColoredString {
    let padded = format!("{:<width$}", tag.to_plain_string(), width = TAG_WIDTH);
    match tag {
        LogTag::System => padded.bright_yellow().bold(),
        LogTag::Rpc => padded.bright_green().bold(),
        LogTag::Poller => padded.bright_cyan().bold(),
        LogTag::Gas => padded.bright_magenta().bold(),
        LogTag::Command => padded.bright_blue().bold(),
    }
}

fn format_level(level: LogLevel) -> ColoredString {
    let padded = format!("{:<width$}", level.as_str(), width = LEVEL_WIDTH);
    match level {
        LogLevel::Error => padded.bright_red().bold(),
        LogLevel::Warning => padded.yellow().bold(),
        LogLevel::Info => padded.white().bold(),
        LogLevel::Debug | LogLevel::Verbose => padded.dimmed(),
    }
}

fn format_message(level: LogLevel, message: &str) -> ColoredString {
    match level {
        LogLevel::Error => message.red(),
        LogLevel::Warning => message.yellow(),
        LogLevel::Debug | LogLevel::Verbose => message.dimmed(),
        LogLevel::Info => message.normal(),
    }
}

/// Print to stderr but ignore broken pipe errors
fn print_stderr_safe(message: &str) {
    let mut handle = stderr().lock();
    if let Err(e) = writeln!(handle, "{}", message) {
        if e.kind() == ErrorKind::BrokenPipe {
            return;
        }
    }
    let _ = handle.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_line_alignment() {
        let line = plain_line(LogTag::Gas, LogLevel::Info, "current 2.00 gwei");
        assert_eq!(line, "[GAS     ] [INFO   ] current 2.00 gwei");
    }

    #[test]
    fn test_plain_line_long_tag() {
        let line = plain_line(LogTag::Command, LogLevel::Warning, "x");
        assert_eq!(line, "[COMMAND ] [WARNING] x");
    }
}
