//! CLI argument definitions for the idrovora packager.
//!
//! Every flag defaults to the fixed packaging behaviour, so running the binary
//! with no arguments from the dist directory builds `idrovora.jar`.

use crate::compiler::DEFAULT_PROGRAM;
use crate::manifest::DiagnosticLevel;
use camino::Utf8PathBuf;
use clap::Parser;

/// Build the self-contained idrovora archive.
#[derive(Parser, Debug, Clone)]
#[command(name = "idrovora-package")]
#[command(version, about)]
#[command(long_about = concat!(
    "Build the self-contained idrovora archive.\n\n",
    "Recreates the project's classes/ staging directory, compiles the entry ",
    "point and logging implementation namespaces ahead of time, assembles ",
    "idrovora.jar from deps.edn with uberdeps, then removes the staging ",
    "directory.\n\n",
    "Run from the dist directory (a direct child of the project root), or ",
    "point --dist-dir at it. A failed stage leaves its output on disk.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Package from the dist directory:\n",
    "    $ idrovora-package\n\n",
    "  Show the resolved layout and commands without running them:\n",
    "    $ idrovora-package --dry-run\n\n",
    "  Use a different Clojure CLI and more assembler output:\n",
    "    $ idrovora-package --clojure /opt/clojure/bin/clojure --level info -v",
))]
pub struct Cli {
    /// Dist directory the archive is written to [default: current directory].
    #[arg(short, long, value_name = "DIR")]
    pub dist_dir: Option<Utf8PathBuf>,

    /// Clojure CLI executable used to compile and assemble.
    #[arg(long, value_name = "PROGRAM", default_value = DEFAULT_PROGRAM)]
    pub clojure: String,

    /// Minimum diagnostic level reported by the assembler.
    #[arg(long, value_enum, value_name = "LEVEL", default_value_t = DiagnosticLevel::Error)]
    pub level: DiagnosticLevel,

    /// Show the resolved layout and commands, then exit without changes.
    #[arg(long)]
    pub dry_run: bool,

    /// Echo each command line before running it (repeatable).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Suppress progress output (errors still shown).
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

impl Default for Cli {
    /// Creates a `Cli` matching a bare invocation with no flags.
    ///
    /// # Examples
    ///
    /// ```
    /// use idrovora_packager::cli::Cli;
    ///
    /// let cli = Cli::default();
    /// assert_eq!(cli.clojure, "clojure");
    /// assert!(!cli.dry_run);
    /// ```
    fn default() -> Self {
        Self {
            dist_dir: None,
            clojure: DEFAULT_PROGRAM.to_owned(),
            level: DiagnosticLevel::Error,
            dry_run: false,
            verbosity: 0,
            quiet: false,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
