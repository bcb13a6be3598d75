//! Shared test utilities for the packager crate.

use crate::exec::CommandExecutor;
use camino::{Utf8Path, Utf8PathBuf};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::io;
use std::process::ExitStatus;

/// Creates an `ExitStatus` from an exit code (Unix implementation).
#[cfg(unix)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;

    ExitStatus::from_raw(code << 8)
}

/// Creates an `ExitStatus` from an exit code (Windows implementation).
#[cfg(windows)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;

    ExitStatus::from_raw(code as u32)
}

/// Represents an expected command invocation for testing.
#[derive(Debug, Clone)]
pub struct ExpectedCall {
    /// The command to execute (e.g., "clojure").
    pub cmd: String,
    /// Leading arguments the invocation must start with.
    pub args_prefix: Vec<String>,
    /// Exit code to report.
    pub exit_code: i32,
    /// Files to create, relative to the invocation's working directory,
    /// before reporting the exit code.
    pub creates: Vec<Utf8PathBuf>,
}

impl ExpectedCall {
    /// Expect `cmd` invoked with arguments starting with `args_prefix`.
    #[must_use]
    pub fn new(cmd: &str, args_prefix: &[&str]) -> Self {
        Self {
            cmd: cmd.to_owned(),
            args_prefix: args_prefix.iter().map(|&arg| arg.to_owned()).collect(),
            exit_code: 0,
            creates: Vec::new(),
        }
    }

    /// Expect the compiler invocation (`clojure -e ...`).
    #[must_use]
    pub fn compile() -> Self {
        Self::new("clojure", &["-e"])
    }

    /// Expect the assembler invocation (`clojure -m uberdeps.uberjar ...`).
    #[must_use]
    pub fn assemble() -> Self {
        Self::new("clojure", &["-m", "uberdeps.uberjar"])
    }

    /// Report `code` as the exit code.
    #[must_use]
    pub fn exits_with(mut self, code: i32) -> Self {
        self.exit_code = code;
        self
    }

    /// Create `path` (relative to the working directory) when invoked.
    #[must_use]
    pub fn creates(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.creates.push(path.into());
        self
    }
}

/// A command invocation observed by [`StubExecutor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// The command that was run.
    pub cmd: String,
    /// Its arguments.
    pub args: Vec<String>,
    /// Its working directory.
    pub cwd: Utf8PathBuf,
}

/// A stub implementation of `CommandExecutor` for testing.
///
/// Serves expected command invocations in order, imitates their filesystem
/// side effects, and records every call it receives. An unexpected or
/// mismatched invocation panics.
#[derive(Debug, Default)]
pub struct StubExecutor {
    expected: RefCell<VecDeque<ExpectedCall>>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl StubExecutor {
    /// Creates a new `StubExecutor` with the given expected calls.
    #[must_use]
    pub fn new(expected: Vec<ExpectedCall>) -> Self {
        Self {
            expected: RefCell::new(expected.into()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Every invocation received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    /// Asserts that all expected command invocations have been consumed.
    ///
    /// # Panics
    ///
    /// Panics if there are remaining expected calls that were not invoked.
    pub fn assert_finished(&self) {
        assert!(
            self.expected.borrow().is_empty(),
            "expected no further command invocations"
        );
    }
}

impl CommandExecutor for StubExecutor {
    fn run(&self, cmd: &str, args: &[String], cwd: &Utf8Path) -> io::Result<ExitStatus> {
        self.calls.borrow_mut().push(RecordedCall {
            cmd: cmd.to_owned(),
            args: args.to_vec(),
            cwd: cwd.to_owned(),
        });

        let call = self
            .expected
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected invocation of {cmd} {args:?}"));

        assert_eq!(call.cmd, cmd);
        assert!(
            call.args_prefix.len() <= args.len()
                && call.args_prefix.iter().zip(args).all(|(want, got)| want == got),
            "expected {} {:?}..., got {cmd} {args:?}",
            call.cmd,
            call.args_prefix
        );

        for relative in &call.creates {
            let path = cwd.join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, relative.as_str())?;
        }

        Ok(exit_status(call.exit_code))
    }
}
