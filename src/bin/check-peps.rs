//! Standalone PEP header linter, usable as a pre-commit hook.

use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use colored::Colorize;

use peps::cli::CheckPepsCli;
use peps::cli::handlers::{CheckParams, CommandContext, handle_check};
use peps::logging;

fn main() -> ExitCode {
    let cli = match CheckPepsCli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };
    logging::init(false, None);

    let result = CommandContext::load(None).and_then(|ctx| {
        handle_check(
            &ctx,
            CheckParams {
                detailed: cli.detailed,
                files: cli.files,
            },
        )
    });

    match result {
        Ok(0) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red(), e);
            ExitCode::FAILURE
        }
    }
}
