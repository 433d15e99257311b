//! Normalizer construction errors.

use super::error_code::{self, ErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("regex error in {stage} pattern '{pattern}': {message}")]
    InvalidPattern {
        stage: &'static str,
        pattern: String,
        message: String,
    },
}

impl ErrorCode for NormalizeError {
    fn error_code(&self) -> &'static str {
        error_code::PATTERN_ERROR
    }
}
