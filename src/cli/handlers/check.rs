use crate::lint::{Linter, display_path};
use anyhow::{Context, Result};
use chrono::Local;
use colored::Colorize;
use std::io::{self, Write};
use std::path::PathBuf;

use super::CommandContext;

pub struct CheckParams {
    pub detailed: bool,
    pub files: Vec<PathBuf>,
}

/// Lint the given files, or every PEP in the source directory when none
/// are given. Diagnostics go to stdout; returns how many were reported.
pub fn handle_check(ctx: &CommandContext, params: CheckParams) -> Result<usize> {
    let files = if params.files.is_empty() {
        ctx.repo()
            .list_sources()
            .context("Failed to list PEP sources")?
    } else {
        params.files
    };

    let linter = Linter::new(Local::now().date_naive())
        .with_skip_list(ctx.config.lint.skip_direct_link_check.iter().copied());
    let cwd = std::env::current_dir().context("Failed to get current directory")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut count = 0;
    for path in &files {
        let report = linter.check_file(path);
        if report.is_clean() {
            continue;
        }
        count += report.messages.len();
        write!(
            out,
            "{}",
            report.render(&display_path(path, &cwd), params.detailed)
        )?;
    }
    out.flush()?;

    tracing::debug!(files = files.len(), errors = count, "Check finished");
    if count > 0 {
        let noun = if count == 1 { "error" } else { "errors" };
        eprintln!(
            "{}",
            format!("check-peps failed: {} {}", count, noun).red()
        );
    }
    Ok(count)
}
