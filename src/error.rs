use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("Malformed file '{path}': {reason}")]
    MalformedFile { path: PathBuf, reason: String },

    #[error("Unsupported file format: '{path}'")]
    UnsupportedFormat { path: PathBuf },

    #[error("Invalid file structure in '{path}': the file must contain \"{time_label}\" and \"{amount_label}\" columns")]
    InvalidStructure {
        path: PathBuf,
        time_label: String,
        amount_label: String,
    },

    #[error("Invalid time '{value}': expected HH:MM:SS")]
    InvalidTimeFormat { value: String },

    #[error("Start time {start} must be before end time {end}")]
    StartNotBeforeEnd { start: String, end: String },

    #[error("No uploaded file found in '{dir}'")]
    NoUploadedFile { dir: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Reader task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}
