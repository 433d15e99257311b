//! Tracing initialization and configuration.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Mutex, Once};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;
use crate::constants;

static INIT: Once = Once::new();

/// Initialize the taskgroup tracing/logging system.
///
/// Reads the `TASKGROUP_LOG` environment variable for per-module log levels.
/// Format: `TASKGROUP_LOG=taskgroup_cluster=debug,taskgroup_io=warn`
///
/// Falls back to `logging.level`, then `taskgroup=info`. When `logging.file`
/// is set, events are also appended to that file without ANSI colors.
///
/// This function is idempotent.
pub fn init_tracing(logging: &LoggingConfig) {
    INIT.call_once(|| {
        let default_filter = logging
            .level
            .clone()
            .unwrap_or_else(|| constants::DEFAULT_LOG_FILTER.to_string());
        let filter = EnvFilter::try_from_env(constants::ENV_LOG)
            .unwrap_or_else(|_| EnvFilter::new(default_filter));

        let file_layer = logging.file.as_deref().and_then(open_log_file).map(|file| {
            fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(Mutex::new(file))
        });

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(file_layer)
            .with(filter)
            .init();
    });
}

fn open_log_file(path: &Path) -> Option<std::fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).ok()?;
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}
