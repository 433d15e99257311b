//! Fatal pipeline errors.
//! Aggregates subsystem errors via `From` conversions.

use super::error_code::ErrorCode;
use super::{ConfigError, InputError, NormalizeError, OutputError};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Normalizer error: {0}")]
    Normalize(#[from] NormalizeError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

impl ErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Input(e) => e.error_code(),
            Self::Normalize(e) => e.error_code(),
            Self::Output(e) => e.error_code(),
        }
    }
}
