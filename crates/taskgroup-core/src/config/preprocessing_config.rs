//! Normalization toggles (`preprocessing.*`).

use serde::{Deserialize, Serialize};

/// Configuration for the text normalizer.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PreprocessingConfig {
    /// Strip half- and full-width spaces. Default: true.
    pub remove_spaces: Option<bool>,
    /// Strip fiscal-year, era, month and quarter tags. Default: true.
    pub remove_period: Option<bool>,
    /// Strip project-phase vocabulary. Default: true.
    pub remove_phase: Option<bool>,
    /// Strip punctuation and brackets (long-vowel mark survives). Default: true.
    pub remove_symbols: Option<bool>,
    /// Map printable ASCII to full-width. Default: true.
    pub normalize_width: Option<bool>,
    /// Expand known abbreviations. Default: false.
    pub normalize_abbreviations: Option<bool>,
}

impl PreprocessingConfig {
    pub fn effective_remove_spaces(&self) -> bool {
        self.remove_spaces.unwrap_or(true)
    }

    pub fn effective_remove_period(&self) -> bool {
        self.remove_period.unwrap_or(true)
    }

    pub fn effective_remove_phase(&self) -> bool {
        self.remove_phase.unwrap_or(true)
    }

    pub fn effective_remove_symbols(&self) -> bool {
        self.remove_symbols.unwrap_or(true)
    }

    pub fn effective_normalize_width(&self) -> bool {
        self.normalize_width.unwrap_or(true)
    }

    pub fn effective_normalize_abbreviations(&self) -> bool {
        self.normalize_abbreviations.unwrap_or(false)
    }
}
