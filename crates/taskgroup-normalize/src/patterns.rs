//! Pattern tables for the normalizer.
//!
//! Period and phase patterns run case-insensitively, one after another, each
//! removing every match. They run on text that has not been width-converted
//! yet, so half- and full-width variants are both listed.

/// Half- and full-width spaces.
pub const SPACE_PATTERN: &str = r"[ 　]+";

/// Fiscal-year, era, month and quarter tags.
pub const PERIOD_PATTERNS: &[&str] = &[
    // Fiscal / calendar years
    r"FY\d{4}",
    r"ＦＹ\d{4}",
    r"FY\d{2}",
    r"ＦＹ\d{2}",
    r"令和\d+年度?",
    r"平成\d+年度?",
    r"令和元年度?",
    r"\d{4}年度?",
    r"\d+年度",
    // Months
    r"\d+月度",
    r"\d+月",
    // Quarters
    r"\d+Q",
    r"\d+Ｑ",
    r"第\d+四半期",
    r"[1-4]Q",
    r"[１-４]Ｑ",
];

/// Project-phase vocabulary. Overlapping entries may both fire on the same
/// text (e.g. `ST` and `テスト`); every pattern runs regardless.
pub const PHASE_PATTERNS: &[&str] = &[
    // Japanese phase names
    r"要件定義",
    r"基本設計",
    r"詳細設計",
    r"外部設計",
    r"内部設計",
    r"開発",
    r"実装",
    r"製造",
    r"プログラミング",
    r"単体テスト",
    r"結合テスト",
    r"総合テスト",
    r"システムテスト",
    r"受入テスト",
    r"テスト",
    r"移行",
    r"リリース",
    r"保守",
    r"運用",
    r"運用保守",
    r"PMO",
    r"プロジェクト管理",
    // English names
    r"RequirementDefinition",
    r"Requirement",
    r"BasicDesign",
    r"DetailedDesign",
    r"Design",
    r"Development",
    r"Implementation",
    r"Programming",
    r"Coding",
    r"UnitTest",
    r"IntegrationTest",
    r"SystemTest",
    r"Test",
    r"Migration",
    r"Maintenance",
    r"Operation",
    r"O&M",
    // Two-character Japanese abbreviations
    r"要[件定]",
    r"基[本設]",
    r"詳[細設]",
    r"外[部設]",
    r"内[部設]",
    // Latin abbreviations
    r"BD",
    r"DD",
    r"PG",
    r"ST",
    r"IT",
    r"UT",
    // Phase numbers
    r"フェーズ\d+",
    r"Phase\d+",
    r"P\d+",
];

/// Separators, brackets and punctuation, matched as one contiguous run.
/// The katakana prolonged sound mark `ー` (U+30FC) is deliberately absent.
/// The information separators U+001C..U+001F count as whitespace here.
pub const SYMBOL_PATTERN: &str = r"[／/\-－―‐【】\[\]()（）「」『』、。，．,.\s\x1C-\x1F]+";

/// Abbreviation → expansion, applied in this order at word boundaries.
pub const ABBREVIATIONS: &[(&str, &str)] = &[
    ("S", "システム"),
    ("ｓ", "システム"),
    ("s", "システム"),
    ("SYS", "システム"),
    ("Sys", "システム"),
    ("HR", "人事"),
    ("ＨＲ", "人事"),
    ("CRM", "顧客管理"),
    ("ＣＲＭ", "顧客管理"),
    ("ERP", "統合基幹"),
    ("ＥＲＰ", "統合基幹"),
    ("SCM", "供給管理"),
    ("ＳＣＭ", "供給管理"),
    ("WMS", "倉庫管理"),
    ("ＷＭＳ", "倉庫管理"),
    ("BPR", "業務改革"),
    ("ＢＰＲ", "業務改革"),
    ("RPA", "自動化"),
    ("ＲＰＡ", "自動化"),
    ("AI", "人工知能"),
    ("ＡＩ", "人工知能"),
    ("ML", "機械学習"),
    ("ＭＬ", "機械学習"),
    ("IoT", "モノのインターネット"),
    ("ＩｏＴ", "モノのインターネット"),
    ("API", "インターフェース"),
    ("ＡＰＩ", "インターフェース"),
    ("DB", "データベース"),
    ("ＤＢ", "データベース"),
    ("Web", "ウェブ"),
    ("ＷＥＢ", "ウェブ"),
    ("WEB", "ウェブ"),
    ("App", "アプリ"),
    ("ＡＰＰ", "アプリ"),
    ("APP", "アプリ"),
];

/// Offset between a printable ASCII code point and its full-width form.
pub const FULL_WIDTH_OFFSET: u32 = 0xFEE0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_pattern_compiles() {
        for p in PERIOD_PATTERNS.iter().chain(PHASE_PATTERNS) {
            assert!(regex::Regex::new(p).is_ok(), "pattern failed: {p}");
        }
        assert!(regex::Regex::new(SYMBOL_PATTERN).is_ok());
        assert!(regex::Regex::new(SPACE_PATTERN).is_ok());
    }

    #[test]
    fn symbol_class_spares_long_vowel_mark() {
        let re = regex::Regex::new(SYMBOL_PATTERN).unwrap();
        assert!(!re.is_match("ー"));
        assert!(re.is_match("―"));
        assert!(re.is_match("‐"));
    }
}
