//! Integration and property tests for the normalization chain.

use proptest::prelude::*;

use taskgroup_core::config::Settings;
use taskgroup_core::records::Record;
use taskgroup_normalize::{to_full_width, NormalizeOptions, TextNormalizer};

fn default_normalizer() -> TextNormalizer {
    TextNormalizer::new(NormalizeOptions::default()).unwrap()
}

#[test]
fn real_data_patterns_collapse_to_shared_keys() {
    let n = default_normalizer();
    let cases = [
        ("FY2024在庫管理システム/要件定義/5月度", "在庫管理システム"),
        ("在庫管理システム/基本設計/6月度", "在庫管理システム"),
        ("FY2024顧客管理システム/要件定義", "顧客管理システム"),
        ("顧客管理システム/開発/1Q", "顧客管理システム"),
        ("EDI連携システム/テスト/2Q", "ＥＤＩ連携システム"),
        ("バージョンアップ/在庫管理システム/運用", "バージョンアップ在庫管理システム"),
    ];
    for (input, expected) in cases {
        assert_eq!(n.normalize(input), expected, "input: {input}");
    }
}

#[test]
fn options_follow_preprocessing_section() {
    let settings = Settings::from_yaml_str(
        "preprocessing:\n  remove_period: false\n  normalize_abbreviations: true\n",
    )
    .unwrap();
    let options = NormalizeOptions::from(&settings.preprocessing);
    assert!(!options.remove_period);
    assert!(options.normalize_abbreviations);
    assert!(options.remove_spaces);

    let n = TextNormalizer::new(options).unwrap();
    assert_eq!(n.options(), options);
    // Period tags survive and are widened.
    assert!(n.normalize("FY2024在庫").starts_with("ＦＹ２０２４"));
}

#[test]
fn records_keep_raw_fields_and_gain_normalized_text() {
    let records = vec![
        Record::new("ORD-001", "A社", "FY2024在庫管理システム開発"),
        Record::new("ORD-002", "A社", "在庫管理システム保守"),
    ];
    let normalized = default_normalizer().normalize_records(records.clone());
    assert_eq!(normalized.len(), 2);
    assert_eq!(normalized[0].record, records[0]);
    assert_eq!(normalized[0].normalized, "在庫管理システム");
    assert_eq!(normalized[1].normalized, "在庫管理システム");
}

proptest! {
    #[test]
    fn prop_width_conversion_leaves_no_printable_ascii(s in "\\PC*") {
        let wide = to_full_width(&s);
        prop_assert!(!wide.chars().any(|c| ('\x21'..='\x7E').contains(&c)));
        prop_assert_eq!(wide.chars().count(), s.chars().count());
    }

    #[test]
    fn prop_batch_preserves_length(texts in proptest::collection::vec("\\PC{0,20}", 0..20)) {
        let results = default_normalizer().normalize_batch(&texts);
        prop_assert_eq!(results.len(), texts.len());
    }

    #[test]
    fn prop_default_output_has_no_spaces_or_slashes(s in "[a-zA-Z0-9 /　／ー在庫管理]{0,30}") {
        let out = default_normalizer().normalize(&s);
        prop_assert!(!out.contains(' '));
        prop_assert!(!out.contains('　'));
        prop_assert!(!out.contains('/'));
        prop_assert!(!out.contains('／'));
    }
}
