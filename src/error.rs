//! Error types for the recall-eval library.

use thiserror::Error;

/// Result type for recall-eval operations.
pub type Result<T> = std::result::Result<T, RecallEvalError>;

/// Error types that can occur during recall evaluation.
#[derive(Error, Debug)]
pub enum RecallEvalError {
    /// Error during I/O operations.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error while serializing the JSON report.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Malformed file discovery pattern.
    #[error("Invalid file pattern: {0}")]
    PatternError(#[from] glob::PatternError),

    /// A discovered path could not be read.
    #[error("File discovery error: {0}")]
    GlobError(#[from] glob::GlobError),

    /// A record file name that cannot be used as an image identifier.
    #[error("Invalid file name: {0} has no UTF-8 image identifier")]
    InvalidFileName(String),

    /// Overlap threshold outside of (0.0, 1.0].
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    /// An image identifier exists on one side of the ground truth / detection pair only.
    #[error("Missing counterpart for '{image_id}': {expected} not found")]
    MissingCounterpart { image_id: String, expected: String },

    /// A record line that does not have the `xmin,ymin,x,y,xmax,ymax,x,y,label` shape.
    #[error(
        "File {file} is in wrong format.\n Expected: xmin,ymin,x,y,xmax,ymax,x,y,label\n Received: {line}"
    )]
    FormatError { file: String, line: String },

    /// No ground truth files were found.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Recall was requested where there are no ground truth boxes.
    #[error("Undefined recall for {0}: no ground truth boxes")]
    UndefinedRecall(String),
}
