//! Packaging pipeline orchestration.
//!
//! A [`Pipeline`] walks the four stages in order: clean the staging
//! directory, compile, assemble the archive, tear the staging directory down.
//! Each stage blocks until it finishes and the first failure stops the run.
//! Nothing is rolled back on failure; whatever the failed stage left on disk
//! stays there.

use crate::assembler::Assembler;
use crate::compiler::Compiler;
use crate::error::{PackagerError, Result};
use crate::exec::{CommandExecutor, ToolInvocation};
use crate::layout::PathSet;
use crate::output::{success_message, write_stderr_line};
use crate::stager;
use camino::Utf8PathBuf;
use log::{info, warn};
use std::fmt;
use std::io::Write;

/// One step of a packaging run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Recreate the staging directory empty.
    Clean,
    /// Compile the units into the staging directory.
    Compile,
    /// Assemble the archive.
    Assemble,
    /// Remove the staging directory.
    Teardown,
}

impl Stage {
    /// All stages in execution order.
    pub const ALL: [Self; 4] = [Self::Clean, Self::Compile, Self::Assemble, Self::Teardown];

    /// State reached once this stage succeeds.
    #[must_use]
    pub const fn completed_state(self) -> PipelineState {
        match self {
            Self::Clean => PipelineState::Cleaned,
            Self::Compile => PipelineState::Compiled,
            Self::Assemble => PipelineState::Assembled,
            Self::Teardown => PipelineState::Done,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Clean => "clean",
            Self::Compile => "compile",
            Self::Assemble => "assemble",
            Self::Teardown => "teardown",
        };
        f.write_str(name)
    }
}

/// Progress of a pipeline. `Failed` is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// No stage has run.
    NotStarted,
    /// The staging directory exists and is empty.
    Cleaned,
    /// Every unit has been compiled.
    Compiled,
    /// The archive has been written.
    Assembled,
    /// The staging directory has been removed.
    Done,
    /// The given stage failed.
    Failed(Stage),
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => f.write_str("not started"),
            Self::Cleaned => f.write_str("cleaned"),
            Self::Compiled => f.write_str("compiled"),
            Self::Assembled => f.write_str("assembled"),
            Self::Done => f.write_str("done"),
            Self::Failed(stage) => write!(f, "failed during {stage}"),
        }
    }
}

/// Context for a packaging run.
pub struct PipelineContext<'a> {
    /// Resolved layout.
    pub paths: &'a PathSet,
    /// Compiler configuration.
    pub compiler: &'a Compiler,
    /// Assembler configuration.
    pub assembler: &'a Assembler,
    /// Verbosity level; at 1 or above each command line is echoed.
    pub verbosity: u8,
    /// Suppress progress output.
    pub quiet: bool,
}

/// A single packaging run.
pub struct Pipeline<'a> {
    context: PipelineContext<'a>,
    executor: &'a dyn CommandExecutor,
    state: PipelineState,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline that runs its tools through `executor`.
    #[must_use]
    pub fn new(context: PipelineContext<'a>, executor: &'a dyn CommandExecutor) -> Self {
        Self {
            context,
            executor,
            state: PipelineState::NotStarted,
        }
    }

    /// Current state of the run.
    #[must_use]
    pub const fn state(&self) -> PipelineState {
        self.state
    }

    /// Run every stage in order and return the archive path.
    ///
    /// Prints progress to `stderr` unless quiet.
    ///
    /// # Errors
    ///
    /// Returns the first stage failure, leaving the pipeline in
    /// [`PipelineState::Failed`]. Returns [`PackagerError::AlreadyRun`] if the
    /// pipeline has run before.
    pub fn run(&mut self, stderr: &mut dyn Write) -> Result<Utf8PathBuf> {
        if self.state != PipelineState::NotStarted {
            return Err(PackagerError::AlreadyRun { state: self.state });
        }

        for stage in Stage::ALL {
            self.run_stage(stage, stderr)?;
        }

        let archive = self.archive_path();
        if !self.context.quiet {
            write_stderr_line(stderr, "");
            write_stderr_line(stderr, success_message(&archive));
        }
        Ok(archive)
    }

    fn run_stage(&mut self, stage: Stage, stderr: &mut dyn Write) -> Result<()> {
        self.report_start(stage, stderr);

        let paths = self.context.paths;
        let outcome = match stage {
            Stage::Clean => stager::ensure_empty(paths.staging_dir()),
            Stage::Compile => {
                self.invoke(stage, &self.context.compiler.invocation(paths), stderr)
            }
            Stage::Assemble => {
                self.invoke(stage, &self.context.assembler.invocation(paths), stderr)
            }
            Stage::Teardown => stager::remove_if_exists(paths.staging_dir()).map(|_| ()),
        };

        match outcome {
            Ok(()) => {
                self.state = stage.completed_state();
                info!("{stage} stage complete");
                Ok(())
            }
            Err(err) => {
                self.state = PipelineState::Failed(stage);
                warn!("{stage} stage failed: {err}");
                Err(err)
            }
        }
    }

    fn invoke(
        &self,
        stage: Stage,
        invocation: &ToolInvocation,
        stderr: &mut dyn Write,
    ) -> Result<()> {
        if self.context.verbosity > 0 && !self.context.quiet {
            write_stderr_line(stderr, format!("  $ {invocation}"));
        }
        invocation.execute(stage, self.executor)
    }

    fn report_start(&self, stage: Stage, stderr: &mut dyn Write) {
        if self.context.quiet {
            return;
        }
        let staging = self.context.paths.staging_dir();
        let message = match stage {
            Stage::Clean => format!("Preparing staging directory {staging}..."),
            Stage::Compile => {
                let units = self.context.compiler.units();
                format!("Compiling {} unit(s): {units}...", units.len())
            }
            Stage::Assemble => format!("Assembling {}...", self.archive_path()),
            Stage::Teardown => format!("Removing staging directory {staging}..."),
        };
        write_stderr_line(stderr, message);
    }

    fn archive_path(&self) -> Utf8PathBuf {
        self.context
            .paths
            .archive_path(self.context.assembler.manifest())
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
