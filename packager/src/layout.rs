//! Filesystem layout of a packaging run.
//!
//! Every path is derived from the dist directory, the location the packager
//! is invoked from. Its parent is the project root, and the staging directory
//! for compiled classes sits directly under the project root.

use crate::error::{FsAction, PackagerError, Result};
use crate::manifest::PackagingManifest;
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;

/// Name of the staging directory under the project root.
pub const STAGING_DIR_NAME: &str = "classes";

/// Resolved absolute paths used by a packaging run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSet {
    dist_dir: Utf8PathBuf,
    project_root: Utf8PathBuf,
    staging_dir: Utf8PathBuf,
}

impl PathSet {
    /// Resolve the layout from a dist directory.
    ///
    /// The directory is canonicalised, so it must already exist.
    ///
    /// # Errors
    ///
    /// Returns a filesystem error if the directory cannot be canonicalised and
    /// [`PackagerError::NoProjectRoot`] if it has no parent.
    pub fn resolve(dist_dir: &Utf8Path) -> Result<Self> {
        let dist_dir = dist_dir
            .canonicalize_utf8()
            .map_err(|source| PackagerError::Filesystem {
                action: FsAction::Resolve,
                path: dist_dir.to_owned(),
                source,
            })?;
        let paths = Self::from_canonical(dist_dir)?;
        debug!("resolved layout {paths:?}");
        Ok(paths)
    }

    /// Resolve the layout from the current working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be read, is not valid
    /// UTF-8, or cannot be resolved.
    pub fn from_current_dir() -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|source| PackagerError::Filesystem {
            action: FsAction::Resolve,
            path: Utf8PathBuf::from("."),
            source,
        })?;
        let cwd = Utf8PathBuf::try_from(cwd).map_err(|err| PackagerError::NonUtf8Path {
            path: err.into_path_buf(),
        })?;
        Self::resolve(&cwd)
    }

    fn from_canonical(dist_dir: Utf8PathBuf) -> Result<Self> {
        let Some(project_root) = dist_dir.parent().map(Utf8Path::to_owned) else {
            return Err(PackagerError::NoProjectRoot { path: dist_dir });
        };
        let staging_dir = project_root.join(STAGING_DIR_NAME);
        Ok(Self {
            dist_dir,
            project_root,
            staging_dir,
        })
    }

    /// The dist directory the archive is written to.
    #[must_use]
    pub fn dist_dir(&self) -> &Utf8Path {
        &self.dist_dir
    }

    /// The project root the compiler runs in.
    #[must_use]
    pub fn project_root(&self) -> &Utf8Path {
        &self.project_root
    }

    /// The staging directory for compiled classes.
    #[must_use]
    pub fn staging_dir(&self) -> &Utf8Path {
        &self.staging_dir
    }

    /// Absolute path of the archive described by `manifest`.
    #[must_use]
    pub fn archive_path(&self, manifest: &PackagingManifest) -> Utf8PathBuf {
        self.dist_dir.join(&manifest.target)
    }

    /// Absolute path of the dependency-declaration file named by `manifest`.
    ///
    /// The result is joined lexically, so it keeps any `..` components.
    #[must_use]
    pub fn deps_file_path(&self, manifest: &PackagingManifest) -> Utf8PathBuf {
        self.dist_dir.join(&manifest.deps_file)
    }
}
