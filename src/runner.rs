//! External command execution
//!
//! Everything that shells out (dpkg, curl) goes through [`CommandRunner`] so
//! the installer can be driven by a fake in tests.

use std::fmt;
use std::process::Command;

use thiserror::Error;
use tracing::debug;

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// The command line, for error messages.
    pub command: String,
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Turn a non-zero exit into [`RunnerError::Failed`].
    pub fn into_checked(self) -> Result<Self, RunnerError> {
        if self.success {
            Ok(self)
        } else {
            Err(RunnerError::Failed {
                command: self.command,
                code: self.code,
                stderr: self.stderr.trim().to_string(),
            })
        }
    }

    /// Trimmed stdout.
    pub fn stdout_trimmed(&self) -> &str {
        self.stdout.trim()
    }
}

/// Errors from running an external command.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command failed: `{command}` (exit {}){}", ExitCode(.code), StderrSuffix(.stderr))]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

struct ExitCode<'a>(&'a Option<i32>);

impl fmt::Display for ExitCode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(code) => write!(f, "{}", code),
            None => write!(f, "signal"),
        }
    }
}

struct StderrSuffix<'a>(&'a str);

impl fmt::Display for StderrSuffix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            Ok(())
        } else {
            write!(f, "\n{}", self.0)
        }
    }
}

/// Capability to run a program and capture its output.
pub trait CommandRunner {
    /// Run `program` with `args` to completion.
    ///
    /// A non-zero exit is not an error here; callers decide with
    /// [`CommandOutput::into_checked`].
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, RunnerError>;
}

/// Runs commands on the host with `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, RunnerError> {
        let command = command_line(program, args);
        debug!(%command, "running command");

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| RunnerError::Spawn {
                command: command.clone(),
                source,
            })?;

        debug!(%command, status = ?output.status.code(), "command finished");

        Ok(CommandOutput {
            command,
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Render a command line for logs and errors.
pub fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}
