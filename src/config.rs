use crate::error::{PepsError, Result};
use crate::lint::DEFAULT_SKIP_DIRECT_LINK_CHECK;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "peps.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PepsConfig {
    #[serde(default)]
    pub paths: PathSettings,

    #[serde(default)]
    pub lint: LintSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PathSettings {
    /// Directory holding `pep-NNNN.rst` sources.
    #[serde(default = "default_source")]
    pub source: PathBuf,

    /// Directory generated files are written to.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    #[serde(default = "default_author_overrides")]
    pub author_overrides: PathBuf,
}

fn default_source() -> PathBuf {
    PathBuf::from("peps")
}

fn default_output() -> PathBuf {
    PathBuf::from("build")
}

fn default_author_overrides() -> PathBuf {
    PathBuf::from("AUTHOR_OVERRIDES.csv")
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            source: default_source(),
            output: default_output(),
            author_overrides: default_author_overrides(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LintSettings {
    /// PEPs allowed to link to other PEPs and RFCs by URL.
    #[serde(default = "default_skip_direct_link_check")]
    pub skip_direct_link_check: Vec<u32>,
}

fn default_skip_direct_link_check() -> Vec<u32> {
    DEFAULT_SKIP_DIRECT_LINK_CHECK.to_vec()
}

impl Default for LintSettings {
    fn default() -> Self {
        Self {
            skip_direct_link_check: default_skip_direct_link_check(),
        }
    }
}

impl PepsConfig {
    /// Load `peps.toml` from `start_path` or the nearest ancestor holding one.
    /// Without a config file the defaults apply and `start_path` is the root.
    pub fn load(start_path: &Path) -> Result<(Self, PathBuf)> {
        let Some(config_path) = Self::find_config_file(start_path) else {
            tracing::debug!(root = %start_path.display(), "No config file found, using defaults");
            return Ok((Self::default(), start_path.to_path_buf()));
        };
        Self::load_from(&config_path)
    }

    /// Load an explicit config file; its directory becomes the project root.
    pub fn load_from(config_path: &Path) -> Result<(Self, PathBuf)> {
        tracing::debug!(path = %config_path.display(), "Loading config");
        let content = std::fs::read_to_string(config_path).map_err(|e| {
            PepsError::Config(format!(
                "Failed to read {}: {}",
                config_path.display(),
                e
            ))
        })?;
        let config: PepsConfig = toml::from_str(&content)?;
        let project_root = config_path
            .parent()
            .ok_or_else(|| PepsError::Config("Config file has no parent directory".to_string()))?
            .to_path_buf();
        Ok((config, project_root))
    }

    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.is_file() {
                return Some(config_path);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    pub fn source_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.paths.source)
    }

    pub fn output_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.paths.output)
    }

    pub fn author_overrides_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.paths.author_overrides)
    }
}
