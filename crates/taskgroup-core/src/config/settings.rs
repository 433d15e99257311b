//! Top-level settings with layered resolution.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use tracing::warn;

use super::{
    ClusteringConfig, CompanyOverrides, InputConfig, LoggingConfig, OutputConfig,
    PreprocessingConfig, TextEncoding,
};
use crate::constants;
use crate::errors::ConfigError;

/// Read-only settings loaded once per run.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `CliOverrides`)
/// 2. Environment variables (`TASKGROUP_*`)
/// 3. Config file (`config.yaml`)
/// 4. Compiled defaults
#[derive(Debug, Clone, Default)]
pub struct Settings {
    raw: Value,
    pub preprocessing: PreprocessingConfig,
    pub clustering: ClusteringConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// The statically-typed sections of the document.
/// `clustering` is compiled separately because its values are heterogeneous.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TypedSections {
    preprocessing: PreprocessingConfig,
    input: InputConfig,
    output: OutputConfig,
    logging: LoggingConfig,
}

/// CLI override arguments that can be applied to loaded settings.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub input_file: Option<PathBuf>,
    pub output_folder: Option<PathBuf>,
    pub output_prefix: Option<String>,
    pub add_timestamp: Option<bool>,
}

impl Settings {
    /// Load settings from a YAML file, then apply env and CLI layers.
    ///
    /// A missing file or malformed YAML is fatal.
    pub fn load(path: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let mut settings = Self::parse(&content, &path.display().to_string())?;

        settings.apply_env_overrides();
        if let Some(cli) = cli_overrides {
            settings.apply_cli_overrides(cli);
        }
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a YAML string (for testing). No env or CLI layers.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let settings = Self::parse(yaml, "<string>")?;
        settings.validate()?;
        Ok(settings)
    }

    fn parse(yaml: &str, origin: &str) -> Result<Self, ConfigError> {
        let raw: Value = serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        // An empty document means "all defaults".
        let raw = match raw {
            Value::Null => Value::Mapping(Mapping::new()),
            Value::Mapping(_) => raw,
            other => {
                return Err(ConfigError::ParseError {
                    path: origin.to_string(),
                    message: format!("top-level document must be a mapping, got {other:?}"),
                })
            }
        };

        let typed: TypedSections =
            serde_yaml::from_value(raw.clone()).map_err(|e| ConfigError::ParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;

        let company_overrides =
            CompanyOverrides::from_yaml(lookup(&raw, "clustering.company_cluster_settings"))?;

        Ok(Self {
            raw,
            preprocessing: typed.preprocessing,
            clustering: ClusteringConfig { company_overrides },
            input: typed.input,
            output: typed.output,
            logging: typed.logging,
        })
    }

    /// Dot-separated key-path lookup into the raw document,
    /// e.g. `settings.get("preprocessing.remove_spaces")`.
    pub fn get(&self, key_path: &str) -> Option<&Value> {
        lookup(&self.raw, key_path)
    }

    /// Number of top-level sections in the loaded document.
    pub fn section_count(&self) -> usize {
        self.raw.as_mapping().map(Mapping::len).unwrap_or(0)
    }

    /// Log every override diagnostic collected at load time.
    pub fn report_diagnostics(&self) {
        for diagnostic in self.clustering.company_overrides.diagnostics() {
            warn!(%diagnostic, "company cluster setting will fall back to the estimate");
        }
    }

    /// Validate the resolved values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(label) = &self.input.encoding {
            if TextEncoding::parse_label(label).is_none() {
                return Err(ConfigError::ValidationFailed {
                    field: "input.encoding".to_string(),
                    message: format!("unsupported encoding '{label}'"),
                });
            }
        }
        if let Some(prefix) = &self.output.prefix {
            if prefix.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "output.prefix".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(constants::ENV_INPUT) {
            self.input.file = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var(constants::ENV_OUTPUT_FOLDER) {
            self.output.folder = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var(constants::ENV_OUTPUT_PREFIX) {
            self.output.prefix = Some(val);
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(&mut self, cli: &CliOverrides) {
        if let Some(ref v) = cli.input_file {
            self.input.file = Some(v.clone());
        }
        if let Some(ref v) = cli.output_folder {
            self.output.folder = Some(v.clone());
        }
        if let Some(ref v) = cli.output_prefix {
            self.output.prefix = Some(v.clone());
        }
        if let Some(v) = cli.add_timestamp {
            self.output.add_timestamp = Some(v);
        }
    }
}

fn lookup<'a>(root: &'a Value, key_path: &str) -> Option<&'a Value> {
    key_path.split('.').try_fold(root, |node, key| match node {
        Value::Mapping(map) => map.get(key),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_path_lookup_walks_mappings() {
        let settings = Settings::from_yaml_str(
            r#"
preprocessing:
  remove_spaces: false
clustering:
  company_cluster_settings:
    みらい銀行: "+2"
"#,
        )
        .unwrap();
        assert_eq!(settings.get("preprocessing.remove_spaces"), Some(&Value::Bool(false)));
        assert!(settings.get("clustering.company_cluster_settings.みらい銀行").is_some());
        assert!(settings.get("preprocessing.remove_spaces.deeper").is_none());
        assert!(settings.get("missing.key").is_none());
        assert!(!settings.preprocessing.effective_remove_spaces());
    }

    #[test]
    fn empty_document_yields_defaults() {
        let settings = Settings::from_yaml_str("").unwrap();
        assert!(settings.preprocessing.effective_remove_period());
        assert!(!settings.preprocessing.effective_normalize_abbreviations());
        assert!(settings.clustering.company_overrides.is_empty());
    }

    #[test]
    fn scalar_document_is_rejected() {
        assert!(matches!(
            Settings::from_yaml_str("just a string"),
            Err(ConfigError::ParseError { .. })
        ));
    }
}
