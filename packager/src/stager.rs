//! Staging directory lifecycle.
//!
//! The staging directory is prepared with [`ensure_empty`] before compiling
//! and removed with [`remove_if_exists`] after the archive is assembled. The
//! two operations are deliberately separate: a failed compile or assemble
//! leaves the staging directory on disk for inspection.

use crate::error::{FsAction, PackagerError, Result};
use camino::Utf8Path;
use log::debug;
use std::fs;
use std::io;

/// Remove `dir` if it is a directory, then create it empty.
///
/// The parent of `dir` must already exist. A non-directory entry at `dir` is
/// not removed, so directory creation fails and the error is returned.
///
/// # Errors
///
/// Returns [`PackagerError::Filesystem`] if removal or creation fails.
pub fn ensure_empty(dir: &Utf8Path) -> Result<()> {
    if dir.is_dir() {
        debug!("removing existing staging directory {dir}");
        fs::remove_dir_all(dir).map_err(|source| fs_error(FsAction::Remove, dir, source))?;
    }

    debug!("creating staging directory {dir}");
    fs::create_dir(dir).map_err(|source| fs_error(FsAction::Create, dir, source))
}

/// Recursively remove `dir`, returning whether anything was removed.
///
/// # Errors
///
/// Returns [`PackagerError::Filesystem`] if `dir` exists but cannot be
/// removed, including when it is not a directory.
pub fn remove_if_exists(dir: &Utf8Path) -> Result<bool> {
    match fs::remove_dir_all(dir) {
        Ok(()) => {
            debug!("removed staging directory {dir}");
            Ok(true)
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!("staging directory {dir} already absent");
            Ok(false)
        }
        Err(source) => Err(fs_error(FsAction::Remove, dir, source)),
    }
}

fn fs_error(action: FsAction, path: &Utf8Path, source: io::Error) -> PackagerError {
    PackagerError::Filesystem {
        action,
        path: path.to_owned(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    struct StagingFixture {
        _temp_dir: TempDir,
        staging: Utf8PathBuf,
    }

    #[fixture]
    fn staging() -> StagingFixture {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let root = Utf8PathBuf::try_from(temp_dir.path().to_owned()).expect("temp dir not UTF-8");
        StagingFixture {
            _temp_dir: temp_dir,
            staging: root.join("classes"),
        }
    }

    fn is_empty_dir(dir: &Utf8Path) -> bool {
        dir.is_dir()
            && fs::read_dir(dir)
                .expect("failed to read staging dir")
                .next()
                .is_none()
    }

    #[rstest]
    fn ensure_empty_creates_missing_directory(staging: StagingFixture) {
        ensure_empty(&staging.staging).expect("should create directory");
        assert!(is_empty_dir(&staging.staging));
    }

    #[rstest]
    fn ensure_empty_discards_existing_contents(staging: StagingFixture) {
        let nested = staging.staging.join("idrovora");
        fs::create_dir_all(&nested).expect("failed to create nested dir");
        fs::write(staging.staging.join("old.class"), b"stale").expect("failed to write");
        fs::write(nested.join("cli.class"), b"stale").expect("failed to write");

        ensure_empty(&staging.staging).expect("should recreate directory");

        assert!(is_empty_dir(&staging.staging));
    }

    #[rstest]
    fn ensure_empty_fails_when_path_is_a_file(staging: StagingFixture) {
        fs::write(&staging.staging, b"not a directory").expect("failed to write");

        let err = ensure_empty(&staging.staging).expect_err("file should block creation");

        assert!(matches!(
            err,
            PackagerError::Filesystem {
                action: FsAction::Create,
                ..
            }
        ));
        assert!(staging.staging.is_file(), "file must be left untouched");
    }

    #[rstest]
    fn ensure_empty_fails_without_parent(staging: StagingFixture) {
        let orphan = staging.staging.join("missing").join("classes");
        let err = ensure_empty(&orphan).expect_err("parent is missing");
        assert!(err.is_filesystem());
    }

    #[rstest]
    fn remove_if_exists_removes_populated_directory(staging: StagingFixture) {
        fs::create_dir_all(staging.staging.join("idrovora")).expect("failed to create dir");
        fs::write(staging.staging.join("idrovora/cli.class"), b"x").expect("failed to write");

        assert!(remove_if_exists(&staging.staging).expect("removal should succeed"));
        assert!(!staging.staging.exists());
    }

    #[rstest]
    fn remove_if_exists_tolerates_absent_directory(staging: StagingFixture) {
        assert!(!remove_if_exists(&staging.staging).expect("absent dir is not an error"));
    }

    #[rstest]
    fn remove_if_exists_rejects_a_file(staging: StagingFixture) {
        fs::write(&staging.staging, b"not a directory").expect("failed to write");

        let err = remove_if_exists(&staging.staging).expect_err("file is not a directory");
        assert!(matches!(
            err,
            PackagerError::Filesystem {
                action: FsAction::Remove,
                ..
            }
        ));
    }
}
