//! # taskgroup-core
//!
//! Foundation crate for taskgroup.
//! Defines the record stages, errors, config, constants, and tracing setup.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod records;
pub mod tracing;

// Re-export the most commonly used types at the crate root.
pub use config::{ClusterCountSetting, CompanyOverrides, Settings};
pub use errors::{ClusterError, ConfigError, ErrorCode, PipelineError};
pub use records::{AnnotatedRecord, NormalizedRecord, Record};
