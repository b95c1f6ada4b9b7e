mod check;
mod index;

pub use check::{CheckParams, handle_check};
pub use index::{IndexParams, handle_index};

use crate::config::PepsConfig;
use crate::storage::PepRepository;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Common context passed to all command handlers
pub struct CommandContext {
    pub config: PepsConfig,
    pub root: PathBuf,
}

impl CommandContext {
    pub fn new(config: PepsConfig, root: PathBuf) -> Self {
        Self { config, root }
    }

    /// Load `config_path`, or discover `peps.toml` from the current directory.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let (config, root) = match config_path {
            Some(path) => PepsConfig::load_from(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => {
                let cwd = std::env::current_dir().context("Failed to get current directory")?;
                PepsConfig::load(&cwd).context("Failed to load config")?
            }
        };
        Ok(Self::new(config, root))
    }

    pub fn repo(&self) -> PepRepository {
        PepRepository::new(&self.config, &self.root)
    }
}
