//! Error types for the idrovora packager.
//!
//! Every failure is fatal to the pipeline. Variants fall into two families:
//! filesystem errors raised while resolving or manipulating directories, and
//! external tool errors raised when the compiler or assembler cannot be
//! launched or exits unsuccessfully.

use crate::pipeline::Stage;
use camino::Utf8PathBuf;
use std::fmt;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Filesystem action that was being attempted when an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsAction {
    /// Canonicalising a path.
    Resolve,
    /// Recursively removing a directory.
    Remove,
    /// Creating a directory.
    Create,
}

impl fmt::Display for FsAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Self::Resolve => "resolve",
            Self::Remove => "remove",
            Self::Create => "create",
        };
        f.write_str(verb)
    }
}

/// Errors that can occur while packaging.
#[derive(Debug, Error)]
pub enum PackagerError {
    /// A directory could not be resolved, created, or removed.
    #[error("failed to {action} {path}: {source}")]
    Filesystem {
        /// What was being attempted.
        action: FsAction,
        /// Path the action was applied to.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A path handed to the packager is not valid UTF-8.
    #[error("path is not valid UTF-8: {}", path.display())]
    NonUtf8Path {
        /// The offending path.
        path: PathBuf,
    },

    /// The dist directory has no parent to act as the project root.
    #[error("dist directory {path} has no parent directory to use as project root")]
    NoProjectRoot {
        /// The resolved dist directory.
        path: Utf8PathBuf,
    },

    /// An external tool could not be started.
    #[error("{stage} stage failed: could not launch {program}: {source}")]
    ToolSpawn {
        /// Stage the tool was invoked from.
        stage: Stage,
        /// Program that was being launched.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An external tool ran but did not exit successfully.
    #[error("{stage} stage failed: {program} exited with {status}")]
    ToolFailed {
        /// Stage the tool was invoked from.
        stage: Stage,
        /// Program that failed.
        program: String,
        /// Exit status reported by the operating system.
        status: ExitStatus,
    },

    /// The compilation unit list is empty.
    #[error("at least one compilation unit is required")]
    EmptyUnitList,

    /// A compilation unit name is not a valid namespace symbol.
    #[error("invalid compilation unit name {name:?}: {reason}")]
    InvalidUnitName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A pipeline was asked to run a second time.
    #[error("pipeline has already run (state: {state})")]
    AlreadyRun {
        /// State the pipeline was left in.
        state: crate::pipeline::PipelineState,
    },
}

impl PackagerError {
    /// Return the stage an external tool failed in, if this is a tool failure.
    #[must_use]
    pub const fn failed_stage(&self) -> Option<Stage> {
        match self {
            Self::ToolSpawn { stage, .. } | Self::ToolFailed { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Return true when the error came from the filesystem rather than a tool.
    #[must_use]
    pub const fn is_filesystem(&self) -> bool {
        matches!(
            self,
            Self::Filesystem { .. } | Self::NonUtf8Path { .. } | Self::NoProjectRoot { .. }
        )
    }
}

/// Result type alias using [`PackagerError`].
pub type Result<T> = std::result::Result<T, PackagerError>;
