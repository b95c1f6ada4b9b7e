use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use peps::cli::handlers::{CheckParams, CommandContext, IndexParams, handle_check, handle_index};
use peps::cli::{Cli, Commands};
use peps::logging;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_file.clone());

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let ctx = CommandContext::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Check { detailed, files } => {
            let errors = handle_check(&ctx, CheckParams { detailed, files })?;
            Ok(if errors == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Index { source, output } => {
            handle_index(&ctx, IndexParams { source, output })?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
