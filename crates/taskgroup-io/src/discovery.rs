//! Input file discovery.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

/// First `*.csv` in `folder`, by file name. `None` when the folder is missing
/// or holds no CSV.
pub fn find_csv(folder: &Path) -> Option<PathBuf> {
    let entries = match std::fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(_) => {
            warn!(folder = %folder.display(), "input folder does not exist");
            return None;
        }
    };

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "csv"))
        .collect();
    candidates.sort();

    let Some(first) = candidates.first().cloned() else {
        warn!(folder = %folder.display(), "no CSV file found");
        return None;
    };

    info!(file = %first.display(), "input CSV detected");
    if candidates.len() > 1 {
        warn!(
            count = candidates.len(),
            using = %first.display(),
            "multiple CSV files found, using the first"
        );
    }
    Some(first)
}
