//! External command execution.
//!
//! The compiler and assembler are both reached through [`CommandExecutor`], a
//! blocking primitive that runs a program to completion in a given working
//! directory and reports only its exit status. Tool output is inherited by the
//! packager's own stdio and never captured or parsed.

use crate::error::{PackagerError, Result};
use crate::pipeline::Stage;
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use std::fmt;
use std::io;
use std::process::{Command, ExitStatus};

/// Abstraction for running external commands.
#[cfg_attr(test, mockall::automock)]
pub trait CommandExecutor {
    /// Runs `cmd` with `args` in `cwd`, blocking until it exits.
    ///
    /// # Errors
    ///
    /// Returns any I/O error encountered while starting the process.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use camino::Utf8Path;
    /// use idrovora_packager::exec::{CommandExecutor, SystemCommandExecutor};
    ///
    /// let executor = SystemCommandExecutor;
    /// let args = ["--version".to_owned()];
    /// let status = executor.run("clojure", &args, Utf8Path::new("."))?;
    /// assert!(status.success());
    /// # Ok::<(), std::io::Error>(())
    /// ```
    fn run(&self, cmd: &str, args: &[String], cwd: &Utf8Path) -> io::Result<ExitStatus>;
}

/// Executes commands on the host system with inherited stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandExecutor;

impl CommandExecutor for SystemCommandExecutor {
    fn run(&self, cmd: &str, args: &[String], cwd: &Utf8Path) -> io::Result<ExitStatus> {
        Command::new(cmd).args(args).current_dir(cwd).status()
    }
}

/// A fully specified external tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    /// Program to run.
    pub program: String,
    /// Arguments passed to the program.
    pub args: Vec<String>,
    /// Working directory for the process.
    pub cwd: Utf8PathBuf,
}

impl ToolInvocation {
    /// Run the invocation and treat any unsuccessful exit as fatal.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::ToolSpawn`] if the program cannot be started
    /// and [`PackagerError::ToolFailed`] if it exits unsuccessfully.
    pub fn execute(&self, stage: Stage, executor: &dyn CommandExecutor) -> Result<()> {
        debug!(
            "running {} {:?} in {} for {stage}",
            self.program, self.args, self.cwd
        );

        let status = executor
            .run(&self.program, &self.args, &self.cwd)
            .map_err(|source| PackagerError::ToolSpawn {
                stage,
                program: self.program.clone(),
                source,
            })?;
        debug!("{} exited with {status}", self.program);

        if status.success() {
            Ok(())
        } else {
            Err(PackagerError::ToolFailed {
                stage,
                program: self.program.clone(),
                status,
            })
        }
    }

    /// Render the command line as it could be pasted into a POSIX shell.
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(shell_quote)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(cd {} && {})", shell_quote(self.cwd.as_str()), self.command_line())
    }
}

/// Quote a single shell word when it contains anything beyond a safe set.
fn shell_quote(word: &str) -> String {
    let is_safe = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:+@%,".contains(c));
    if is_safe {
        word.to_owned()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}
