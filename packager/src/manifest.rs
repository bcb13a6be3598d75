//! Packaging manifest for the archive assembler.
//!
//! The manifest groups everything the assembler needs to know: where the
//! dependency declarations live, where the archive goes, which unit launches
//! it, and how chatty the assembler should be. Paths are relative to the dist
//! directory because the assembler runs there.

use crate::units::{ENTRY_POINT_UNIT, UnitName};
use camino::Utf8PathBuf;
use clap::ValueEnum;
use std::fmt;

/// Name of the dependency-declaration file at the project root.
pub const DEPS_FILE_NAME: &str = "deps.edn";

/// File name of the produced archive inside the dist directory.
pub const ARCHIVE_NAME: &str = "idrovora.jar";

/// Namespace of the assembler's entry function.
pub const ASSEMBLER_NAMESPACE: &str = "uberdeps.uberjar";

/// Minimum diagnostic level reported by the assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DiagnosticLevel {
    /// Report everything.
    Debug,
    /// Report progress and above.
    Info,
    /// Report warnings and errors.
    Warn,
    /// Report errors only.
    #[default]
    Error,
}

impl DiagnosticLevel {
    /// The value passed to the assembler's `--level` option.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of the archive to assemble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagingManifest {
    /// Dependency-declaration file, relative to the dist directory.
    pub deps_file: Utf8PathBuf,
    /// Archive path, relative to the dist directory.
    pub target: Utf8PathBuf,
    /// Unit launched when the archive is executed.
    pub main_class: UnitName,
    /// Assembler diagnostic level.
    pub level: DiagnosticLevel,
}

impl PackagingManifest {
    /// The manifest for the idrovora archive at the given diagnostic level.
    ///
    /// # Examples
    ///
    /// ```
    /// use idrovora_packager::manifest::{DiagnosticLevel, PackagingManifest};
    ///
    /// let manifest = PackagingManifest::idrovora(DiagnosticLevel::Error);
    /// assert_eq!(manifest.deps_file, "../deps.edn");
    /// assert_eq!(manifest.target, "idrovora.jar");
    /// assert_eq!(manifest.main_class.as_str(), "idrovora.cli");
    /// ```
    #[must_use]
    pub fn idrovora(level: DiagnosticLevel) -> Self {
        Self {
            deps_file: Utf8PathBuf::from("..").join(DEPS_FILE_NAME),
            target: Utf8PathBuf::from(ARCHIVE_NAME),
            main_class: UnitName::builtin(ENTRY_POINT_UNIT),
            level,
        }
    }

    /// Arguments selecting the assembler and describing the archive.
    #[must_use]
    pub fn assembler_args(&self) -> Vec<String> {
        vec![
            "-m".to_owned(),
            ASSEMBLER_NAMESPACE.to_owned(),
            "--level".to_owned(),
            self.level.as_str().to_owned(),
            "--deps-file".to_owned(),
            self.deps_file.to_string(),
            "--target".to_owned(),
            self.target.to_string(),
            "--main-class".to_owned(),
            self.main_class.to_string(),
        ]
    }
}
