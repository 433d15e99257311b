//! read → normalize → cluster → write.

use std::path::PathBuf;

use taskgroup_cluster::ClusteringEngine;
use taskgroup_core::config::Settings;
use taskgroup_core::errors::{InputError, OutputError, PipelineError};
use taskgroup_io::{find_csv, read_records, write_records, InputTable, WriteOptions};
use taskgroup_normalize::{NormalizeOptions, TextNormalizer};
use tracing::info;

/// What one run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub rows: usize,
    pub companies: usize,
    pub clusters: usize,
    pub fallbacks: usize,
}

/// The explicit input file, else the first CSV in the input folder.
pub fn resolve_input(settings: &Settings) -> Result<PathBuf, InputError> {
    if let Some(file) = &settings.input.file {
        return Ok(file.clone());
    }
    let folder = settings.input.effective_folder();
    find_csv(&folder).ok_or_else(|| InputError::NoCsvFound {
        folder: folder.display().to_string(),
    })
}

pub fn run(settings: &Settings) -> Result<PipelineSummary, PipelineError> {
    let input = resolve_input(settings)?;
    let InputTable { headers, records } =
        read_records(&input, settings.input.effective_encoding())?;
    let rows = records.len();

    let normalizer = TextNormalizer::new(NormalizeOptions::from(&settings.preprocessing))?;
    let normalized = normalizer.normalize_records(records);

    let engine = ClusteringEngine::new(settings.clustering.company_overrides.clone());
    let report = engine.cluster(normalized);
    if report.records.len() != rows {
        return Err(OutputError::RowCountMismatch {
            input: rows,
            annotated: report.records.len(),
        }
        .into());
    }

    let output = write_records(&headers, &report.records, &WriteOptions::from(&settings.output))?;

    let summary = PipelineSummary {
        input,
        output,
        rows,
        companies: report.companies.len(),
        clusters: report.total_clusters(),
        fallbacks: report.fallback_count(),
    };
    info!(
        input = %summary.input.display(),
        output = %summary.output.display(),
        rows = summary.rows,
        companies = summary.companies,
        clusters = summary.clusters,
        fallbacks = summary.fallbacks,
        "taskgroup finished"
    );
    Ok(summary)
}
