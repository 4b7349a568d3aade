//! Binary entrypoint for the `ftbfs-reminder` CLI.

use std::process::ExitCode;

use clap::Parser;
use ftbfs_reminder::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match ftbfs_reminder::run(&cli) {
        Ok(report) if report.is_clean() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(ftbfs_reminder::EXIT_SOME_FAILED),
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
