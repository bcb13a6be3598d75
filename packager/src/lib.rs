//! Idrovora packager library.
//!
//! This crate builds the self-contained `idrovora.jar` archive. A packaging
//! run recreates the project's `classes` staging directory, compiles the
//! configured namespaces ahead of time, assembles the archive from `deps.edn`,
//! and removes the staging directory again. It is used by the
//! `idrovora-package` binary and can be driven programmatically with a custom
//! [`exec::CommandExecutor`] for testing.
//!
//! # Modules
//!
//! - [`assembler`] - Archive assembler invocation
//! - [`cli`] - Command-line argument definitions
//! - [`compiler`] - Ahead-of-time compiler invocation
//! - [`error`] - Error types for filesystem and external tool failures
//! - [`exec`] - Blocking external command execution
//! - [`layout`] - Dist, project root, and staging directory resolution
//! - [`manifest`] - Packaging manifest for the assembler
//! - [`output`] - Progress and dry-run output formatting
//! - [`package_flow`] - CLI-driven packaging flow
//! - [`pipeline`] - Stage sequencing and state tracking
//! - [`stager`] - Staging directory lifecycle
//! - [`units`] - Compilation unit names and lists

pub mod assembler;
pub mod cli;
pub mod compiler;
pub mod error;
pub mod exec;
pub mod layout;
pub mod manifest;
pub mod output;
pub mod package_flow;
pub mod pipeline;
pub mod stager;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
pub mod units;
