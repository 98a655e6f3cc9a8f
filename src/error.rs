use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Unsupported input format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Failed to open workbook {}: {message}", path.display())]
    Workbook { path: PathBuf, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl AppError {
    pub fn workbook(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        AppError::Workbook {
            path: path.into(),
            message: err.to_string(),
        }
    }
}
