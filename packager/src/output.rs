//! Output formatting for the packager CLI.
//!
//! Progress lines, the success message, and the dry-run summary are all
//! written to an injected writer so tests can capture them.

use crate::exec::ToolInvocation;
use crate::layout::PathSet;
use camino::Utf8Path;
use std::io::Write;

/// Write a single line, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}

/// Format a success message after packaging.
#[must_use]
pub fn success_message(archive: &Utf8Path) -> String {
    format!("Successfully packaged {archive}")
}

/// Resolved configuration shown by `--dry-run`.
///
/// # Example
///
/// ```no_run
/// use camino::Utf8Path;
/// use idrovora_packager::assembler::Assembler;
/// use idrovora_packager::compiler::Compiler;
/// use idrovora_packager::layout::PathSet;
/// use idrovora_packager::output::DryRunInfo;
///
/// let paths = PathSet::resolve(Utf8Path::new("dist"))?;
/// let assembler = Assembler::default();
/// let info = DryRunInfo {
///     paths: &paths,
///     archive: &paths.archive_path(assembler.manifest()),
///     deps_file: &paths.deps_file_path(assembler.manifest()),
///     compile: &Compiler::default().invocation(&paths),
///     assemble: &assembler.invocation(&paths),
/// };
/// assert!(info.display_text().contains("Dry run"));
/// # Ok::<(), idrovora_packager::error::PackagerError>(())
/// ```
#[derive(Debug)]
pub struct DryRunInfo<'a> {
    /// Resolved layout.
    pub paths: &'a PathSet,
    /// Absolute archive path.
    pub archive: &'a Utf8Path,
    /// Dependency manifest the assembler reads.
    pub deps_file: &'a Utf8Path,
    /// Compiler invocation that would run.
    pub compile: &'a ToolInvocation,
    /// Assembler invocation that would run.
    pub assemble: &'a ToolInvocation,
}

impl DryRunInfo<'_> {
    /// Format the dry-run information for display.
    #[must_use]
    pub fn display_text(&self) -> String {
        [
            "Dry run - no files will be modified".to_owned(),
            String::new(),
            format!("Project root: {}", self.paths.project_root()),
            format!("Dist directory: {}", self.paths.dist_dir()),
            format!("Staging directory: {}", self.paths.staging_dir()),
            format!("Archive: {}", self.archive),
            format!("Dependencies: {}", self.deps_file),
            String::new(),
            "Commands:".to_owned(),
            format!("  compile:  {}", self.compile),
            format!("  assemble: {}", self.assemble),
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::Assembler;
    use crate::compiler::Compiler;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    #[test]
    fn success_message_names_archive() {
        let msg = success_message(Utf8Path::new("/project/dist/idrovora.jar"));
        assert!(msg.contains("/project/dist/idrovora.jar"));
    }

    #[test]
    fn write_stderr_line_appends_newline() {
        let mut buffer = Vec::new();
        write_stderr_line(&mut buffer, "hello");
        assert_eq!(buffer, b"hello\n");
    }

    #[test]
    fn dry_run_lists_layout_and_commands() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let root = Utf8PathBuf::try_from(temp_dir.path().to_owned()).expect("temp dir not UTF-8");
        std::fs::create_dir(root.join("dist")).expect("failed to create dist dir");
        let paths = PathSet::resolve(&root.join("dist")).expect("layout should resolve");
        let assembler = Assembler::default();
        let archive = paths.archive_path(assembler.manifest());
        let deps_file = paths.deps_file_path(assembler.manifest());
        let compile = Compiler::default().invocation(&paths);
        let assemble = assembler.invocation(&paths);

        let text = DryRunInfo {
            paths: &paths,
            archive: &archive,
            deps_file: &deps_file,
            compile: &compile,
            assemble: &assemble,
        }
        .display_text();

        assert!(text.starts_with("Dry run"));
        assert!(text.contains(paths.staging_dir().as_str()));
        assert!(text.contains("idrovora.jar"));
        assert!(text.contains(&format!(
            "Dependencies: {}",
            paths.dist_dir().join("../deps.edn")
        )));
        assert!(text.contains("uberdeps.uberjar"));
        assert!(text.contains("(compile p)"));
    }
}
