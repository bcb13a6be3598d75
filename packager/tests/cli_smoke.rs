//! End-to-end tests for the `idrovora-package` binary.
//!
//! A shell script stands in for the Clojure CLI so the binary can be driven
//! through a whole run without a JVM.
#![cfg(unix)]

use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::process::{Command, Output};
use std::sync::Mutex;
use tempfile::TempDir;

// Executing a freshly written script can fail with ETXTBSY while another test
// thread is forking.
static SERIAL: Mutex<()> = Mutex::new(());

const FAKE_CLOJURE: &str = r#"#!/bin/sh
case "$1" in
  -e)
    mkdir -p classes/idrovora
    : > classes/idrovora/cli__init.class
    exit "${FAKE_COMPILE_EXIT:-0}"
    ;;
  -m)
    if [ "${FAKE_ASSEMBLE_EXIT:-0}" != 0 ]; then
      exit "$FAKE_ASSEMBLE_EXIT"
    fi
    [ -f ../classes/idrovora/cli__init.class ] || exit 9
    : > idrovora.jar
    ;;
  *)
    exit 64
    ;;
esac
"#;

struct Project {
    _temp_dir: TempDir,
    root: Utf8PathBuf,
    clojure: Utf8PathBuf,
}

impl Project {
    fn dist(&self) -> Utf8PathBuf {
        self.root.join("dist")
    }

    fn staging(&self) -> Utf8PathBuf {
        self.root.join("classes")
    }

    fn command(&self) -> Command {
        let mut command = Command::new(env!("CARGO_BIN_EXE_idrovora-package"));
        command
            .arg("--clojure")
            .arg(self.clojure.as_str())
            .env_remove("FAKE_COMPILE_EXIT")
            .env_remove("FAKE_ASSEMBLE_EXIT");
        command
    }

    fn run(&self, command: &mut Command) -> Output {
        let _guard = SERIAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        command.output().expect("failed to spawn idrovora-package")
    }
}

#[fixture]
fn project() -> Project {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let root = Utf8PathBuf::try_from(temp_dir.path().to_owned())
        .expect("temp dir not UTF-8")
        .canonicalize_utf8()
        .expect("failed to canonicalise temp dir");
    fs::create_dir(root.join("dist")).expect("failed to create dist dir");
    fs::write(root.join("deps.edn"), "{}").expect("failed to write deps.edn");

    let bin_dir = root.join("bin");
    fs::create_dir(&bin_dir).expect("failed to create bin dir");
    let clojure = bin_dir.join("clojure");
    fs::write(&clojure, FAKE_CLOJURE).expect("failed to write fake clojure");
    fs::set_permissions(&clojure, fs::Permissions::from_mode(0o755))
        .expect("failed to mark fake clojure executable");

    Project {
        _temp_dir: temp_dir,
        root,
        clojure,
    }
}

fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[rstest]
fn packages_from_the_current_directory(project: Project) {
    let output = project.run(project.command().current_dir(project.dist()));

    assert!(output.status.success(), "stderr: {}", stderr_text(&output));
    assert!(project.dist().join("idrovora.jar").is_file());
    assert!(!project.staging().exists());
    assert!(stderr_text(&output).contains("Successfully packaged"));
}

#[rstest]
fn packages_an_explicit_dist_dir(project: Project) {
    let output = project.run(
        project
            .command()
            .arg("--dist-dir")
            .arg(project.dist().as_str())
            .arg("--quiet")
            .current_dir(&project.root),
    );

    assert!(output.status.success(), "stderr: {}", stderr_text(&output));
    assert!(project.dist().join("idrovora.jar").is_file());
    assert!(!project.staging().exists());
    assert!(stderr_text(&output).is_empty());
}

#[rstest]
fn compile_failure_exits_non_zero_and_keeps_staging(project: Project) {
    let output = project.run(
        project
            .command()
            .env("FAKE_COMPILE_EXIT", "3")
            .current_dir(project.dist()),
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_text(&output).contains("compile stage failed"));
    assert!(project.staging().join("idrovora/cli__init.class").is_file());
    assert!(!project.dist().join("idrovora.jar").exists());
}

#[rstest]
fn assemble_failure_exits_non_zero_and_keeps_staging(project: Project) {
    let output = project.run(
        project
            .command()
            .env("FAKE_ASSEMBLE_EXIT", "2")
            .current_dir(project.dist()),
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_text(&output).contains("assemble stage failed"));
    assert!(project.staging().is_dir());
    assert!(!project.dist().join("idrovora.jar").exists());
}

#[rstest]
fn missing_toolchain_is_reported(project: Project) {
    let mut command = Command::new(env!("CARGO_BIN_EXE_idrovora-package"));
    command
        .arg("--clojure")
        .arg(project.root.join("bin/missing-clojure").as_str())
        .current_dir(project.dist());

    let output = project.run(&mut command);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_text(&output).contains("missing-clojure"));
}

#[rstest]
fn dry_run_prints_plan_and_touches_nothing(project: Project) {
    fs::create_dir(project.staging()).expect("failed to create staging dir");
    fs::write(project.staging().join("old.class"), "stale").expect("failed to write stale class");

    let output = project.run(
        project
            .command()
            .arg("--dry-run")
            .current_dir(project.dist()),
    );

    assert!(output.status.success(), "stderr: {}", stderr_text(&output));
    let stderr = stderr_text(&output);
    assert!(stderr.contains("Dry run"));
    assert!(stderr.contains("--main-class idrovora.cli"));
    assert!(project.staging().join("old.class").is_file());
    assert!(!project.dist().join("idrovora.jar").exists());
}
