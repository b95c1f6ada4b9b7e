use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PepsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Pep(#[from] PepError),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("some authors have more than one email address listed:\n{0}")]
    ConflictingEmails(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, PepsError>;

/// A PEP source that cannot be turned into a record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct PepError {
    pub message: String,
    pub filename: PathBuf,
    pub number: Option<u32>,
}

impl PepError {
    pub fn new(message: impl Into<String>, filename: &Path) -> Self {
        Self {
            message: message.into(),
            filename: filename.to_path_buf(),
            number: None,
        }
    }

    pub fn with_number(mut self, number: u32) -> Self {
        self.number = Some(number);
        self
    }
}

impl fmt::Display for PepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(number) = self.number {
            write!(f, "PEP {} ", number)?;
        }
        write!(f, "({}): {}", self.filename.display(), self.message)
    }
}
