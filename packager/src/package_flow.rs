//! End-to-end packaging flow driven by CLI arguments.
//!
//! This is the library half of the `idrovora-package` binary: it resolves the
//! layout, builds the compiler and assembler from the CLI, and either prints a
//! dry-run summary or runs the pipeline.

use crate::assembler::Assembler;
use crate::cli::Cli;
use crate::compiler::Compiler;
use crate::error::Result;
use crate::exec::CommandExecutor;
use crate::layout::PathSet;
use crate::manifest::PackagingManifest;
use crate::output::{DryRunInfo, write_stderr_line};
use crate::pipeline::{Pipeline, PipelineContext};
use crate::units::CompilationUnitList;
use std::io::Write;

/// Run the packaging flow described by `cli`.
///
/// # Errors
///
/// Returns the first filesystem or external tool error encountered.
pub fn run(cli: &Cli, executor: &dyn CommandExecutor, stderr: &mut dyn Write) -> Result<()> {
    let paths = match &cli.dist_dir {
        Some(dir) => PathSet::resolve(dir)?,
        None => PathSet::from_current_dir()?,
    };
    let compiler = Compiler::new(cli.clojure.as_str(), CompilationUnitList::idrovora());
    let assembler = Assembler::new(cli.clojure.as_str(), PackagingManifest::idrovora(cli.level));

    if cli.dry_run {
        print_dry_run_info(&paths, &compiler, &assembler, stderr);
        return Ok(());
    }

    let context = PipelineContext {
        paths: &paths,
        compiler: &compiler,
        assembler: &assembler,
        verbosity: cli.verbosity,
        quiet: cli.quiet,
    };
    Pipeline::new(context, executor).run(stderr)?;
    Ok(())
}

fn print_dry_run_info(
    paths: &PathSet,
    compiler: &Compiler,
    assembler: &Assembler,
    stderr: &mut dyn Write,
) {
    let archive = paths.archive_path(assembler.manifest());
    let deps_file = paths.deps_file_path(assembler.manifest());
    let info = DryRunInfo {
        paths,
        archive: &archive,
        deps_file: &deps_file,
        compile: &compiler.invocation(paths),
        assemble: &assembler.invocation(paths),
    };
    write_stderr_line(stderr, info.display_text());
}

/// Map a run result to a process exit code, reporting any error.
pub fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, format!("error: {err}"));
            1
        }
    }
}
