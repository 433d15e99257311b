//! Configuration system for taskgroup.
//! YAML-based, layered resolution: CLI > env > config file > defaults.

pub mod clustering_config;
pub mod io_config;
pub mod logging_config;
pub mod preprocessing_config;
pub mod settings;

pub use clustering_config::{ClusterCountSetting, ClusteringConfig, CompanyOverrides};
pub use io_config::{InputConfig, OutputConfig, TextEncoding};
pub use logging_config::LoggingConfig;
pub use preprocessing_config::PreprocessingConfig;
pub use settings::{CliOverrides, Settings};
