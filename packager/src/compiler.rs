//! Ahead-of-time compilation of the configured units.
//!
//! The compiler is the Clojure CLI evaluating a single form that calls
//! `compile` on each unit in order. It runs from the project root, whose
//! `deps.edn` points `*compile-path*` at the staging directory.

use crate::exec::ToolInvocation;
use crate::layout::PathSet;
use crate::units::CompilationUnitList;

/// Default toolchain executable.
pub const DEFAULT_PROGRAM: &str = "clojure";

/// Builds the compiler invocation for a set of units.
#[derive(Debug, Clone)]
pub struct Compiler {
    program: String,
    units: CompilationUnitList,
}

impl Compiler {
    /// Create a compiler that runs `program` over `units`.
    #[must_use]
    pub fn new(program: impl Into<String>, units: CompilationUnitList) -> Self {
        Self {
            program: program.into(),
            units,
        }
    }

    /// The units this compiler will compile.
    #[must_use]
    pub const fn units(&self) -> &CompilationUnitList {
        &self.units
    }

    /// The invocation that compiles every unit from the project root.
    #[must_use]
    pub fn invocation(&self, paths: &PathSet) -> ToolInvocation {
        ToolInvocation {
            program: self.program.clone(),
            args: vec!["-e".to_owned(), self.units.compile_form()],
            cwd: paths.project_root().to_owned(),
        }
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM, CompilationUnitList::idrovora())
    }
}
