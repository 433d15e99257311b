//! TextNormalizer: compiled once, applied per row.

use regex::{NoExpand, Regex, RegexBuilder};
use taskgroup_core::config::PreprocessingConfig;
use taskgroup_core::errors::NormalizeError;
use taskgroup_core::records::{NormalizedRecord, Record};
use tracing::{debug, info};

use crate::patterns;

/// Which normalization steps run. Every step is independently toggleable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub remove_spaces: bool,
    pub remove_period: bool,
    pub remove_phase: bool,
    pub remove_symbols: bool,
    pub normalize_width: bool,
    pub normalize_abbreviations: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            remove_spaces: true,
            remove_period: true,
            remove_phase: true,
            remove_symbols: true,
            normalize_width: true,
            normalize_abbreviations: false,
        }
    }
}

impl NormalizeOptions {
    /// Every step disabled; handy as a base for single-step configurations.
    pub fn none() -> Self {
        Self {
            remove_spaces: false,
            remove_period: false,
            remove_phase: false,
            remove_symbols: false,
            normalize_width: false,
            normalize_abbreviations: false,
        }
    }
}

impl From<&PreprocessingConfig> for NormalizeOptions {
    fn from(config: &PreprocessingConfig) -> Self {
        Self {
            remove_spaces: config.effective_remove_spaces(),
            remove_period: config.effective_remove_period(),
            remove_phase: config.effective_remove_phase(),
            remove_symbols: config.effective_remove_symbols(),
            normalize_width: config.effective_normalize_width(),
            normalize_abbreviations: config.effective_normalize_abbreviations(),
        }
    }
}

/// Applies the ordered normalization chain to task names.
///
/// All patterns are compiled in [`TextNormalizer::new`] and held as instance
/// data, so differently-configured normalizers never share state.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    options: NormalizeOptions,
    space: Regex,
    period: Vec<Regex>,
    phase: Vec<Regex>,
    symbols: Regex,
    abbreviations: Vec<(Regex, &'static str)>,
}

impl TextNormalizer {
    pub fn new(options: NormalizeOptions) -> Result<Self, NormalizeError> {
        let space = compile("space", patterns::SPACE_PATTERN, false)?;
        let period = patterns::PERIOD_PATTERNS
            .iter()
            .map(|p| compile("period", p, true))
            .collect::<Result<Vec<_>, _>>()?;
        let phase = patterns::PHASE_PATTERNS
            .iter()
            .map(|p| compile("phase", p, true))
            .collect::<Result<Vec<_>, _>>()?;
        let symbols = compile("symbol", patterns::SYMBOL_PATTERN, false)?;
        let abbreviations = patterns::ABBREVIATIONS
            .iter()
            .map(|(abbr, full)| {
                let pattern = format!(r"\b{}\b", regex::escape(abbr));
                compile("abbreviation", &pattern, false).map(|re| (re, *full))
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(?options, "text normalizer initialized");
        Ok(Self {
            options,
            space,
            period,
            phase,
            symbols,
            abbreviations,
        })
    }

    pub fn options(&self) -> NormalizeOptions {
        self.options
    }

    /// Normalize one task name.
    ///
    /// Steps, in this exact order:
    /// 1. space removal
    /// 2. period removal (before width conversion)
    /// 3. phase removal (before width conversion)
    /// 4. symbol removal, keeping `ー`
    /// 5. half-width → full-width
    /// 6. abbreviation expansion
    pub fn normalize(&self, text: &str) -> String {
        let mut result = text.to_string();

        if self.options.remove_spaces {
            result = self.remove_spaces(&result);
        }
        if self.options.remove_period {
            result = self.remove_period(&result);
        }
        if self.options.remove_phase {
            result = self.remove_phase(&result);
        }
        if self.options.remove_symbols {
            result = self.remove_symbols(&result);
        }
        if self.options.normalize_width {
            result = to_full_width(&result);
        }
        if self.options.normalize_abbreviations {
            result = self.expand_abbreviations(&result);
        }

        result
    }

    /// Absent input normalizes to the empty string.
    pub fn normalize_opt(&self, text: Option<&str>) -> String {
        text.map(|t| self.normalize(t)).unwrap_or_default()
    }

    /// Normalize a sequence, preserving order and length.
    pub fn normalize_batch<S: AsRef<str>>(&self, texts: &[S]) -> Vec<String> {
        info!(count = texts.len(), "normalization started");
        let results: Vec<String> = texts.iter().map(|t| self.normalize(t.as_ref())).collect();
        info!(count = results.len(), "normalization complete");
        results
    }

    /// Attach normalized text to each record.
    pub fn normalize_records(&self, records: Vec<Record>) -> Vec<NormalizedRecord> {
        info!(count = records.len(), "normalization started");
        let normalized: Vec<NormalizedRecord> = records
            .into_iter()
            .map(|record| {
                let normalized = self.normalize(&record.task_name);
                debug!(raw = %record.task_name, %normalized, "normalized");
                NormalizedRecord { record, normalized }
            })
            .collect();
        info!(count = normalized.len(), "normalization complete");
        normalized
    }

    pub fn remove_spaces(&self, text: &str) -> String {
        self.space.replace_all(text, "").into_owned()
    }

    pub fn remove_period(&self, text: &str) -> String {
        strip_each(&self.period, text)
    }

    pub fn remove_phase(&self, text: &str) -> String {
        strip_each(&self.phase, text)
    }

    pub fn remove_symbols(&self, text: &str) -> String {
        self.symbols.replace_all(text, "").into_owned()
    }

    /// Expand known abbreviations standing alone between word boundaries.
    ///
    /// Japanese script counts as word characters, so `在庫管理S` is left as is.
    pub fn expand_abbreviations(&self, text: &str) -> String {
        self.abbreviations
            .iter()
            .fold(text.to_string(), |acc, (re, full)| {
                re.replace_all(&acc, NoExpand(*full)).into_owned()
            })
    }
}

/// Map printable ASCII (0x21..=0x7E) to its full-width counterpart.
pub fn to_full_width(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{21}'..='\u{7E}' => {
                char::from_u32(c as u32 + patterns::FULL_WIDTH_OFFSET).unwrap_or(c)
            }
            _ => c,
        })
        .collect()
}

/// Run every pattern in turn, removing all matches of each.
fn strip_each(patterns: &[Regex], text: &str) -> String {
    patterns.iter().fold(text.to_string(), |acc, re| {
        re.replace_all(&acc, "").into_owned()
    })
}

fn compile(
    stage: &'static str,
    pattern: &str,
    case_insensitive: bool,
) -> Result<Regex, NormalizeError> {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|e| NormalizeError::InvalidPattern {
            stage,
            pattern: pattern.to_string(),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> TextNormalizer {
        TextNormalizer::new(NormalizeOptions::default()).unwrap()
    }

    #[test]
    fn removes_half_and_full_width_spaces() {
        let result = normalizer().remove_spaces("プロジェクト　名　テスト project name test");
        assert!(!result.contains('　'));
        assert!(!result.contains(' '));
        assert!(result.contains("プロジェクト"));
        assert!(result.contains("project"));
    }

    #[test]
    fn removes_fiscal_year_tag() {
        let result = normalizer().remove_period("FY2024在庫管理システム");
        assert!(!result.contains("FY2024"));
        assert!(result.contains("在庫管理システム"));
    }

    #[test]
    fn removes_era_month_and_quarter_tags() {
        let n = normalizer();
        assert_eq!(n.remove_period("令和6年度在庫管理システム"), "在庫管理システム");
        assert_eq!(n.remove_period("令和元年度在庫管理"), "在庫管理");
        assert_eq!(n.remove_period("5月度在庫管理システム"), "在庫管理システム");
        assert_eq!(n.remove_period("1Q在庫管理システム"), "在庫管理システム");
        assert_eq!(n.remove_period("１Ｑ在庫管理システム"), "在庫管理システム");
        assert_eq!(n.remove_period("第3四半期報告"), "報告");
        assert_eq!(n.remove_period("fy24在庫"), "在庫");
    }

    #[test]
    fn removes_phase_terms() {
        let n = normalizer();
        for (input, keyword) in [
            ("要件定義/在庫管理システム", "在庫管理システム"),
            ("基本設計/顧客管理システム", "顧客管理システム"),
            ("詳細設計/EDI連携", "EDI連携"),
            ("BasicDesign/在庫管理システム", "在庫管理システム"),
            ("Development/EDI", "EDI"),
            ("BD/在庫管理システム", "在庫管理システム"),
            ("Phase2/EDI連携", "EDI連携"),
        ] {
            let result = n.remove_phase(input);
            assert!(result.contains(keyword), "{input} -> {result}");
        }
    }

    #[test]
    fn overlapping_phase_patterns_all_fire() {
        // `ST` and `テスト` both match; both are removed.
        assert_eq!(normalizer().remove_phase("ST/テスト"), "/");
        // `保守` runs before `運用` and `運用保守`, consuming the compound.
        assert_eq!(normalizer().remove_phase("運用保守"), "");
    }

    #[test]
    fn symbol_removal_keeps_long_vowel_mark() {
        let result = normalizer().remove_symbols("バージョン／アップ【テスト】");
        assert!(!result.contains('／'));
        assert!(!result.contains('【'));
        assert!(!result.contains('】'));
        assert!(result.contains("バージョン"));
        assert!(result.contains('ー'));

        let result = normalizer().remove_symbols("システム-開発(テスト)");
        assert_eq!(result, "システム開発テスト");
    }

    #[test]
    fn symbol_removal_strips_separator_controls() {
        let result = normalizer().remove_symbols("在庫\u{1C}管理\u{1F}システム\t保守\u{3000}");
        assert_eq!(result, "在庫管理システム保守");
    }

    #[test]
    fn width_conversion_maps_printable_ascii() {
        assert_eq!(to_full_width("ABC123"), "ＡＢＣ１２３");
        assert_eq!(to_full_width("test-system"), "ｔｅｓｔ－ｓｙｓｔｅｍ");
        assert_eq!(to_full_width("a b"), "ａ ｂ");
        assert_eq!(to_full_width("在庫"), "在庫");
    }

    #[test]
    fn abbreviations_only_expand_at_ascii_boundaries() {
        let options = NormalizeOptions {
            normalize_abbreviations: true,
            ..NormalizeOptions::none()
        };
        let n = TextNormalizer::new(options).unwrap();
        for unchanged in ["在庫管理S", "HR部門", "CRM導入", "DB設計"] {
            assert_eq!(n.normalize(unchanged), unchanged);
        }
        assert_eq!(n.normalize("CRM"), "顧客管理");
        assert_eq!(n.normalize("HR/DB"), "人事/データベース");
        assert_eq!(n.normalize("ＡＩ 活用"), "人工知能 活用");
        assert_eq!(n.normalize("SYS"), "システム");
    }

    #[test]
    fn full_pipeline_respects_order() {
        let result = normalizer().normalize("FY2024 バージョン／アップ 要件定義 5月度");
        assert_eq!(result, "バージョンアップ");
    }

    #[test]
    fn full_pipeline_widens_surviving_ascii() {
        assert_eq!(normalizer().normalize("EDI連携システム/要件定義/FY2024"), "ＥＤＩ連携システム");
    }

    #[test]
    fn disabled_steps_leave_text_alone() {
        let n = TextNormalizer::new(NormalizeOptions::none()).unwrap();
        assert_eq!(n.normalize("在庫 管理 システム"), "在庫 管理 システム");

        let keep_period = TextNormalizer::new(NormalizeOptions {
            remove_spaces: true,
            ..NormalizeOptions::none()
        })
        .unwrap();
        assert_eq!(keep_period.normalize("FY2024在庫管理システム"), "FY2024在庫管理システム");
    }

    #[test]
    fn empty_and_absent_inputs() {
        let n = normalizer();
        assert_eq!(n.normalize(""), "");
        assert_eq!(n.normalize_opt(None), "");
    }

    #[test]
    fn batch_preserves_order_and_length() {
        let texts = ["FY2024在庫管理システム/要件定義", "顧客管理S/基本設計", "EDI連携/テスト/1Q", ""];
        let results = normalizer().normalize_batch(&texts);
        assert_eq!(results.len(), 4);
        assert!(!results[0].contains("FY2024"));
        assert!(!results[0].contains("要件定義"));
        assert_eq!(results[3], "");
    }
}
