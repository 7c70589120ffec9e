//! Tokensrc - Command-line tool for exporting design variables as token trees

use std::process::ExitCode;

use tokensrc::cli;

fn main() -> ExitCode {
    cli::run()
}
