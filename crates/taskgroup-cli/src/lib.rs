pub mod pipeline;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use taskgroup_core::config::{CliOverrides, LoggingConfig, Settings};
use taskgroup_core::constants::DEFAULT_CONFIG_FILE;
use taskgroup_core::errors::{ErrorCode, PipelineError};
use taskgroup_core::tracing::init_tracing;
use tracing::{error, info};

use crate::pipeline::PipelineSummary;

#[derive(Debug, Parser)]
#[command(
    name = "taskgroup",
    about = "Normalize task names and group them per company",
    long_about = "Read a CSV of orders, normalize each task name, cluster the names per company, \
                  and write the rows back with a cluster id and representative name.",
    after_help = "Examples:\n  taskgroup\n  taskgroup --input data/orders.csv --output-dir out\n  taskgroup --config prod.yaml --output monthly --no-timestamp"
)]
pub struct Cli {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE, help = "Path to the YAML config file")]
    pub config: PathBuf,

    #[arg(long, help = "Input CSV; skips discovery in the input folder")]
    pub input: Option<PathBuf>,

    #[arg(long, value_name = "PREFIX", help = "Output file name prefix")]
    pub output: Option<String>,

    #[arg(long = "output-dir", value_name = "DIR", help = "Output folder")]
    pub output_dir: Option<PathBuf>,

    #[arg(long, help = "Do not append a timestamp to the output file name")]
    pub no_timestamp: bool,
}

impl Cli {
    /// Flags that override the config file and environment.
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            input_file: self.input.clone(),
            output_folder: self.output_dir.clone(),
            output_prefix: self.output.clone(),
            add_timestamp: self.no_timestamp.then_some(false),
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    match execute(&cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e.coded_string());
            ExitCode::FAILURE
        }
    }
}

/// Load settings, start logging, and run the pipeline.
pub fn execute(cli: &Cli) -> Result<PipelineSummary, PipelineError> {
    let settings = match Settings::load(&cli.config, Some(&cli.overrides())) {
        Ok(settings) => settings,
        Err(e) => {
            init_tracing(&LoggingConfig::default());
            return Err(e.into());
        }
    };
    init_tracing(&settings.logging);
    info!(config = %cli.config.display(), "taskgroup starting");
    info!(
        sections = settings.section_count(),
        overrides = settings.clustering.company_overrides.len(),
        "config loaded"
    );
    settings.report_diagnostics();

    pipeline::run(&settings)
}
