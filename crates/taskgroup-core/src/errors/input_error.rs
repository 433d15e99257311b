//! Input discovery and reading errors.

use super::error_code::{self, ErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Input file not found: {path}")]
    FileNotFound { path: String },

    #[error("No CSV file found in {folder}")]
    NoCsvFound { folder: String },

    #[error("Required columns missing: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("Failed to decode {path} as {encoding}")]
    Decode { path: String, encoding: String },

    #[error("CSV read error in {path}: {message}")]
    Csv { path: String, message: String },
}

impl ErrorCode for InputError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } | Self::NoCsvFound { .. } => error_code::INPUT_NOT_FOUND,
            Self::MissingColumns { .. } => error_code::MISSING_COLUMNS,
            Self::Decode { .. } => error_code::DECODE_ERROR,
            Self::Csv { .. } => error_code::CSV_ERROR,
        }
    }
}
