//! Output sink errors.

use super::error_code::{self, ErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("I/O error writing {path}: {message}")]
    Io { path: String, message: String },

    #[error("CSV write error in {path}: {message}")]
    Csv { path: String, message: String },

    #[error("Annotated row count {annotated} does not match input row count {input}")]
    RowCountMismatch { input: usize, annotated: usize },
}

impl ErrorCode for OutputError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Csv { .. } => error_code::CSV_ERROR,
            Self::Io { .. } | Self::RowCountMismatch { .. } => error_code::OUTPUT_ERROR,
        }
    }
}
