//! Stable error codes for logs and exit reporting.

/// Every error enum implements this to expose a structured code string.
pub trait ErrorCode {
    /// Returns the error code string (e.g., "CONFIG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted log line: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const INPUT_NOT_FOUND: &str = "INPUT_NOT_FOUND";
pub const MISSING_COLUMNS: &str = "MISSING_COLUMNS";
pub const DECODE_ERROR: &str = "DECODE_ERROR";
pub const CSV_ERROR: &str = "CSV_ERROR";
pub const OUTPUT_ERROR: &str = "OUTPUT_ERROR";
pub const PATTERN_ERROR: &str = "PATTERN_ERROR";
pub const CLUSTER_ERROR: &str = "CLUSTER_ERROR";
