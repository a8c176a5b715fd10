// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cannot read source file {path}: {source}")]
    FileUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unsupported file type: {path} (expected .pdf, .md, or .markdown)")]
    UnsupportedFileType { path: PathBuf },

    #[error("Failed to write index {path}: {source}")]
    PersistenceWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to place artifact {path}: {source}")]
    ArtifactPlacement {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
