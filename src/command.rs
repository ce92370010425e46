//! Shell command execution
//!
//! The command is an opaque string handed to a shell interpreter. Its stdout
//! is captured and returned; its stderr is forwarded to ours so failures stay
//! visible next to our own diagnostics.

use crate::errors::SublimateError;
use crate::logger::{self, LogTag};
use std::process::Stdio;
use tokio::process::Command;

/// Shell program plus the flag that makes it run a command string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
    pub program: String,
    pub flag: String,
}

impl Shell {
    /// `sh -c` on Unix, `cmd /C` on Windows
    pub fn platform_default() -> Self {
        if cfg!(windows) {
            Self::from_program("cmd")
        } else {
            Self::from_program("sh")
        }
    }

    /// Pick the command-string flag that matches the given shell
    pub fn from_program(program: impl Into<String>) -> Self {
        let program = program.into();
        let name = std::path::Path::new(&program)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let flag = match name.as_str() {
            "cmd" => "/C",
            "powershell" | "pwsh" => "-Command",
            _ => "-c",
        };
        Self {
            program,
            flag: flag.to_string(),
        }
    }
}

/// Run `command` through `shell` and return its captured stdout
///
/// Waits for the process without a timeout. A non-zero exit still returns
/// the captured bytes inside `SublimateError::CommandFailed`.
pub async fn execute(shell: &Shell, command: &str) -> Result<Vec<u8>, SublimateError> {
    logger::debug(
        LogTag::Command,
        &format!("Spawning `{} {} {}`", shell.program, shell.flag, command),
    );

    let child = Command::new(&shell.program)
        .arg(&shell.flag)
        .arg(command)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|source| SublimateError::Spawn {
            shell: shell.program.clone(),
            command: command.to_string(),
            source,
        })?;

    let output = child
        .wait_with_output()
        .await
        .map_err(|source| SublimateError::Spawn {
            shell: shell.program.clone(),
            command: command.to_string(),
            source,
        })?;

    logger::debug(
        LogTag::Command,
        &format!(
            "Command finished with {} ({} bytes of output)",
            output.status,
            output.stdout.len()
        ),
    );

    if !output.status.success() {
        return Err(SublimateError::CommandFailed {
            command: command.to_string(),
            code: output.status.code(),
            output: output.stdout,
        });
    }

    Ok(output.stdout)
}
