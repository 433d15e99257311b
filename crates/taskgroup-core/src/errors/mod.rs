//! Error handling for taskgroup.
//! One error enum per subsystem, `thiserror` only.

pub mod cluster_error;
pub mod config_error;
pub mod error_code;
pub mod input_error;
pub mod normalize_error;
pub mod output_error;
pub mod pipeline_error;

pub use cluster_error::ClusterError;
pub use config_error::ConfigError;
pub use error_code::ErrorCode;
pub use input_error::InputError;
pub use normalize_error::NormalizeError;
pub use output_error::OutputError;
pub use pipeline_error::PipelineError;
