//! Archive assembly.
//!
//! The assembler merges the staged classes with the dependencies declared in
//! `deps.edn` into a single executable archive. It runs from the dist
//! directory so the manifest's relative paths resolve against it.

use crate::compiler::DEFAULT_PROGRAM;
use crate::exec::ToolInvocation;
use crate::layout::PathSet;
use crate::manifest::{DiagnosticLevel, PackagingManifest};

/// Builds the assembler invocation for a manifest.
#[derive(Debug, Clone)]
pub struct Assembler {
    program: String,
    manifest: PackagingManifest,
}

impl Assembler {
    /// Create an assembler that runs `program` with `manifest`.
    #[must_use]
    pub fn new(program: impl Into<String>, manifest: PackagingManifest) -> Self {
        Self {
            program: program.into(),
            manifest,
        }
    }

    /// The manifest describing the archive.
    #[must_use]
    pub const fn manifest(&self) -> &PackagingManifest {
        &self.manifest
    }

    /// The invocation that writes the archive into the dist directory.
    #[must_use]
    pub fn invocation(&self, paths: &PathSet) -> ToolInvocation {
        ToolInvocation {
            program: self.program.clone(),
            args: self.manifest.assembler_args(),
            cwd: paths.dist_dir().to_owned(),
        }
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new(
            DEFAULT_PROGRAM,
            PackagingManifest::idrovora(DiagnosticLevel::default()),
        )
    }
}
