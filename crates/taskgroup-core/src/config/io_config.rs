//! Input and output collaborator settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants;

/// Character encodings accepted for input files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    /// UTF-8 with a leading byte-order mark.
    Utf8Bom,
    ShiftJis,
}

impl TextEncoding {
    /// Parse a user-facing label. Case-insensitive; `_` and `-` are interchangeable.
    pub fn parse_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "utf-8" | "utf8" => Some(Self::Utf8),
            "utf-8-sig" | "utf8-sig" => Some(Self::Utf8Bom),
            "shift-jis" | "sjis" | "cp932" | "windows-31j" => Some(Self::ShiftJis),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Utf8Bom => "utf-8-sig",
            Self::ShiftJis => "shift-jis",
        }
    }
}

/// Where the input CSV comes from.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct InputConfig {
    /// Folder scanned for a `*.csv` when no explicit file is given. Default: `input`.
    pub folder: Option<PathBuf>,
    /// Explicit input file; skips discovery.
    pub file: Option<PathBuf>,
    /// Forced encoding label; detected from the file when absent.
    pub encoding: Option<String>,
}

impl InputConfig {
    pub fn effective_folder(&self) -> PathBuf {
        self.folder
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_INPUT_FOLDER))
    }

    /// The forced encoding, if one is configured and recognized.
    pub fn effective_encoding(&self) -> Option<TextEncoding> {
        self.encoding.as_deref().and_then(TextEncoding::parse_label)
    }
}

/// Where and how the annotated CSV is written.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    /// Output folder, created when missing. Default: `output`.
    pub folder: Option<PathBuf>,
    /// File name prefix. Default: `clustered_tasks`.
    pub prefix: Option<String>,
    /// Append `_YYYYMMDD_HHMMSS` to the file name. Default: true.
    pub add_timestamp: Option<bool>,
}

impl OutputConfig {
    pub fn effective_folder(&self) -> PathBuf {
        self.folder
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_OUTPUT_FOLDER))
    }

    pub fn effective_prefix(&self) -> String {
        self.prefix
            .clone()
            .unwrap_or_else(|| constants::DEFAULT_OUTPUT_PREFIX.to_string())
    }

    pub fn effective_add_timestamp(&self) -> bool {
        self.add_timestamp.unwrap_or(true)
    }
}
