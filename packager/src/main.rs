//! Idrovora packager CLI entrypoint.
//!
//! Builds `idrovora.jar` from the dist directory and exits non-zero if any
//! stage fails.

use clap::Parser;
use idrovora_packager::cli::Cli;
use idrovora_packager::exec::SystemCommandExecutor;
use idrovora_packager::package_flow::{exit_code_for_run_result, run};

fn main() {
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &SystemCommandExecutor, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}
