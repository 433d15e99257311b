//! Tests for the taskgroup configuration system.

use std::path::PathBuf;
use std::sync::Mutex;

use taskgroup_core::config::{CliOverrides, ClusterCountSetting, Settings, TextEncoding};
use taskgroup_core::errors::ConfigError;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all TASKGROUP_ env vars to prevent cross-test contamination.
fn clear_env_vars() {
    for key in [
        "TASKGROUP_INPUT",
        "TASKGROUP_OUTPUT_FOLDER",
        "TASKGROUP_OUTPUT_PREFIX",
    ] {
        std::env::remove_var(key);
    }
}

const SAMPLE_CONFIG: &str = r#"
preprocessing:
  normalize_width: true
  remove_spaces: true
  remove_period: true
  remove_phase: true
  remove_symbols: true
  normalize_abbreviations: false

clustering:
  company_cluster_settings:
    みらい銀行: "+2"
    東京システム株式会社: 7
    ABC株式会社: "-1"

input:
  folder: data
  encoding: shift_jis

output:
  prefix: result
  add_timestamp: false
"#;

#[test]
fn test_load_full_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempdir();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, SAMPLE_CONFIG).unwrap();

    let settings = Settings::load(&path, None).unwrap();

    assert_eq!(settings.section_count(), 4);
    assert!(settings.preprocessing.effective_normalize_width());
    assert!(!settings.preprocessing.effective_normalize_abbreviations());
    let overrides = &settings.clustering.company_overrides;
    assert_eq!(overrides.get("みらい銀行"), Some(&ClusterCountSetting::Offset(2)));
    assert_eq!(overrides.get("東京システム株式会社"), Some(&ClusterCountSetting::Fixed(7)));
    assert_eq!(overrides.get("ABC株式会社"), Some(&ClusterCountSetting::Offset(-1)));
    assert_eq!(settings.input.effective_folder(), PathBuf::from("data"));
    assert_eq!(settings.input.effective_encoding(), Some(TextEncoding::ShiftJis));
    assert_eq!(settings.output.effective_prefix(), "result");
    assert!(!settings.output.effective_add_timestamp());
}

#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempdir();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, SAMPLE_CONFIG).unwrap();

    std::env::set_var("TASKGROUP_OUTPUT_PREFIX", "from_env");
    std::env::set_var("TASKGROUP_OUTPUT_FOLDER", "/tmp/from_env");

    let cli = CliOverrides {
        output_prefix: Some("from_cli".to_string()),
        ..Default::default()
    };
    let settings = Settings::load(&path, Some(&cli)).unwrap();

    // CLI beats env beats file.
    assert_eq!(settings.output.effective_prefix(), "from_cli");
    assert_eq!(settings.output.effective_folder(), PathBuf::from("/tmp/from_env"));

    clear_env_vars();
}

#[test]
fn test_missing_config_file_is_fatal() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let dir = tempdir();
    let result = Settings::load(&dir.path().join("nope.yaml"), None);
    assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
}

#[test]
fn test_malformed_yaml_is_fatal() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let dir = tempdir();
    let path = dir.path().join("invalid_config.yaml");
    std::fs::write(&path, "invalid: yaml: syntax: error:").unwrap();
    let result = Settings::load(&path, None);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn test_wrong_field_type_is_parse_error() {
    let result = Settings::from_yaml_str("preprocessing:\n  remove_spaces: [1, 2]\n");
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn test_validation_rejects_unknown_encoding() {
    let result = Settings::from_yaml_str("input:\n  encoding: latin-1\n");
    assert!(matches!(result, Err(ConfigError::ValidationFailed { .. })));
}

#[test]
fn test_non_mapping_company_settings_is_invalid_value() {
    let result = Settings::from_yaml_str("clustering:\n  company_cluster_settings: [a, b]\n");
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

#[test]
fn test_invalid_overrides_are_diagnostics_not_errors() {
    let settings = Settings::from_yaml_str(
        "clustering:\n  company_cluster_settings:\n    テスト会社: \"+abc\"\n    リスト会社: [invalid, list]\n",
    )
    .unwrap();
    assert_eq!(settings.clustering.company_overrides.diagnostics().len(), 2);
    assert!(settings
        .clustering
        .company_overrides
        .get("テスト会社")
        .unwrap()
        .is_invalid());
}
