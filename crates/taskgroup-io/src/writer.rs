//! Writing annotated records.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use taskgroup_core::config::OutputConfig;
use taskgroup_core::constants::{COLUMN_CLUSTER_ID, COLUMN_REPRESENTATIVE};
use taskgroup_core::errors::OutputError;
use taskgroup_core::records::AnnotatedRecord;
use tracing::info;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Resolved output location and naming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    pub folder: PathBuf,
    pub prefix: String,
    pub add_timestamp: bool,
}

impl From<&OutputConfig> for WriteOptions {
    fn from(config: &OutputConfig) -> Self {
        Self {
            folder: config.effective_folder(),
            prefix: config.effective_prefix(),
            add_timestamp: config.effective_add_timestamp(),
        }
    }
}

/// `{prefix}_{YYYYMMDD_HHMMSS}.csv`, or `{prefix}.csv` without a timestamp.
pub fn output_file_name(prefix: &str, add_timestamp: bool, now: DateTime<Local>) -> String {
    if add_timestamp {
        format!("{prefix}_{}.csv", now.format("%Y%m%d_%H%M%S"))
    } else {
        format!("{prefix}.csv")
    }
}

/// Write `records` under the original `headers` plus the cluster id and
/// representative columns. Returns the path written.
pub fn write_records(
    headers: &[String],
    records: &[AnnotatedRecord],
    options: &WriteOptions,
) -> Result<PathBuf, OutputError> {
    std::fs::create_dir_all(&options.folder).map_err(|e| io_error(&options.folder, e))?;

    let file_name = output_file_name(&options.prefix, options.add_timestamp, Local::now());
    let path = options.folder.join(&file_name);
    info!(file = %path.display(), "writing CSV");

    let mut file = File::create(&path).map_err(|e| io_error(&path, e))?;
    file.write_all(UTF8_BOM).map_err(|e| io_error(&path, e))?;

    let csv_error = |e: csv::Error| OutputError::Csv {
        path: path.display().to_string(),
        message: e.to_string(),
    };
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(file);

    let header_row = headers
        .iter()
        .map(String::as_str)
        .chain([COLUMN_CLUSTER_ID, COLUMN_REPRESENTATIVE]);
    writer.write_record(header_row).map_err(csv_error)?;

    for annotated in records {
        let cluster_id = annotated.cluster_id.to_string();
        let row = annotated
            .record
            .fields
            .iter()
            .map(String::as_str)
            .chain([cluster_id.as_str(), annotated.representative_name.as_str()]);
        writer.write_record(row).map_err(csv_error)?;
    }
    writer.flush().map_err(|e| io_error(&path, e))?;

    info!(
        rows = records.len(),
        columns = headers.len() + 2,
        "CSV written"
    );
    Ok(path)
}

fn io_error(path: &Path, e: std::io::Error) -> OutputError {
    OutputError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}
