//! Logging configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Optional log file, written in addition to the console.
    pub file: Option<PathBuf>,
    /// Default filter directive when `TASKGROUP_LOG` is unset (e.g. "taskgroup=debug").
    pub level: Option<String>,
}
