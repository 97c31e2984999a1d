use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocatorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Traversal failed under {}: {message}", .path.display())]
    Traversal { path: PathBuf, message: String },

    #[error("Scan cancelled")]
    Cancelled,

    #[error("Scan budget exhausted after {visited} entries")]
    BudgetExhausted { visited: usize },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Language not supported: {0}")]
    UnsupportedLanguage(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl LocatorError {
    /// Scan aborted by the caller or by its budget rather than by the file system.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Cancelled | Self::BudgetExhausted { .. })
    }
}

pub type Result<T> = std::result::Result<T, LocatorError>;
