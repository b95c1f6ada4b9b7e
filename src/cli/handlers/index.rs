use crate::index;
use crate::storage::{PepRepository, load_author_overrides};
use anyhow::{Context, Result};
use chrono::Local;
use colored::Colorize;
use std::path::PathBuf;

use super::CommandContext;

pub struct IndexParams {
    pub source: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

/// Build PEP 0, the topic indices and `peps.json`.
pub fn handle_index(ctx: &CommandContext, params: IndexParams) -> Result<()> {
    let source = params
        .source
        .unwrap_or_else(|| ctx.config.source_path(&ctx.root));
    let output = params
        .output
        .unwrap_or_else(|| ctx.config.output_path(&ctx.root));
    let repo = PepRepository::with_paths(source, output);

    let overrides = load_author_overrides(&ctx.config.author_overrides_path(&ctx.root))
        .context("Failed to load author overrides")?;
    let written = index::generate(&repo, &overrides, Local::now().date_naive())
        .context("Failed to generate PEP index")?;

    for path in &written {
        let shown = path.strip_prefix(repo.output_path()).unwrap_or(path);
        println!("{} {}", "Generated".green(), shown.display().to_string().cyan());
    }
    println!(
        "{} files written to {}",
        written.len(),
        repo.output_path().display()
    );
    Ok(())
}
