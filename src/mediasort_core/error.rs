use crate::mediasort_core::runner::Stage;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MediasortError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Enumeration errors
    #[error("Source path not available: {0}")]
    SourceUnavailable(PathBuf),

    #[error("Failed to walk directory {path}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("Failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to check whether {path} exists: {source}")]
    ExistenceCheck {
        path: PathBuf,
        source: std::io::Error,
    },

    // Transfer errors
    #[error("Failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to move {from} to {to}: {source}")]
    Move {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    // Metadata errors
    #[error("Failed to extract metadata from {path}: {reason}")]
    MetadataExtraction { path: PathBuf, reason: String },

    #[error("Date parsing error: {0}")]
    InvalidDateFormat(String),

    #[error("No capture date found in {0}")]
    MissingCaptureDate(PathBuf),

    // Watermark errors
    #[error("Last import file {path} is unusable: {reason}")]
    Watermark { path: PathBuf, reason: String },

    // A stage of a run failed
    #[error("Failed to {stage}")]
    Stage {
        stage: Stage,
        source: Box<MediasortError>,
    },
}

/// Result type for mediasort operations.
pub type Result<T> = std::result::Result<T, MediasortError>;
