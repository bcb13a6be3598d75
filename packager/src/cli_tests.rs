//! Tests for packager CLI parsing and default behaviours.

use super::*;
use rstest::rstest;

#[test]
fn cli_parses_defaults() {
    let cli = Cli::parse_from(["idrovora-package"]);
    assert!(cli.dist_dir.is_none());
    assert_eq!(cli.clojure, "clojure");
    assert_eq!(cli.level, DiagnosticLevel::Error);
    assert!(!cli.dry_run);
    assert_eq!(cli.verbosity, 0);
    assert!(!cli.quiet);
}

#[test]
fn parsed_defaults_match_default_impl() {
    let parsed = Cli::parse_from(["idrovora-package"]);
    let default = Cli::default();
    assert_eq!(parsed.dist_dir, default.dist_dir);
    assert_eq!(parsed.clojure, default.clojure);
    assert_eq!(parsed.level, default.level);
}

#[test]
fn cli_parses_dist_dir() {
    let cli = Cli::parse_from(["idrovora-package", "-d", "/srv/idrovora/dist"]);
    assert_eq!(cli.dist_dir, Some(Utf8PathBuf::from("/srv/idrovora/dist")));
}

#[test]
fn cli_parses_clojure_override() {
    let cli = Cli::parse_from(["idrovora-package", "--clojure", "/opt/bin/clj"]);
    assert_eq!(cli.clojure, "/opt/bin/clj");
}

#[rstest]
#[case::debug("debug", DiagnosticLevel::Debug)]
#[case::info("info", DiagnosticLevel::Info)]
#[case::warn("warn", DiagnosticLevel::Warn)]
#[case::error("error", DiagnosticLevel::Error)]
fn cli_parses_level(#[case] value: &str, #[case] expected: DiagnosticLevel) {
    let cli = Cli::parse_from(["idrovora-package", "--level", value]);
    assert_eq!(cli.level, expected);
}

#[test]
fn cli_rejects_unknown_level() {
    let result = Cli::try_parse_from(["idrovora-package", "--level", "trace"]);
    assert!(result.is_err());
}

#[rstest]
#[case::single("-v", 1)]
#[case::double("-vv", 2)]
#[case::long("--verbose", 1)]
fn cli_counts_verbosity(#[case] flag: &str, #[case] expected: u8) {
    let cli = Cli::parse_from(["idrovora-package", flag]);
    assert_eq!(cli.verbosity, expected);
}

#[test]
fn cli_rejects_quiet_with_verbose() {
    let result = Cli::try_parse_from(["idrovora-package", "-q", "-v"]);
    assert!(result.is_err());
}

#[test]
fn cli_parses_dry_run() {
    let cli = Cli::parse_from(["idrovora-package", "--dry-run"]);
    assert!(cli.dry_run);
}

#[test]
fn cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
