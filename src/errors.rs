use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("No pattern file found at {}", .0.display())]
    MissingPatternFile(PathBuf),

    #[error("Pattern file could not be read or parsed: {0}")]
    PatternParseError(String),

    #[error("Failed to scan project tree: {0}")]
    ScanError(String),

    #[error("Failed to copy {path}: {message}")]
    CopyIoError { path: String, message: String },

    #[error("IO Error: {0}")]
    IoError(String),

    #[error("Settings error: {0}")]
    SettingsError(String),
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::IoError(err.to_string())
    }
}
