//! Per-company cluster-count overrides (`clustering.company_cluster_settings`).
//!
//! Raw YAML values are compiled once, at load time, into a closed
//! `ClusterCountSetting`. Malformed entries become `Invalid` and carry a
//! diagnostic; they are never an error at load time.

use std::collections::HashMap;

use serde_yaml::Value;

use crate::errors::ConfigError;

/// One company's cluster-count directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterCountSetting {
    /// Signed adjustment applied to the estimated count (`"+2"`, `"-1"`).
    Offset(i64),
    /// Exact count; the estimate is ignored.
    Fixed(i64),
    /// Unusable directive; resolution falls back to the estimate.
    Invalid { raw: String, reason: String },
}

impl ClusterCountSetting {
    /// Compile a YAML value. `Null` means "no setting" and yields `None`.
    pub fn from_yaml(value: &Value) -> Option<Self> {
        let setting = match value {
            Value::Null => return None,
            Value::String(s) => Self::parse_directive(s),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Fixed(i)
                } else if let Some(f) = n.as_f64().filter(|f| f.is_finite()) {
                    // Fractional counts truncate toward zero.
                    Self::Fixed(f.trunc() as i64)
                } else {
                    Self::Invalid {
                        raw: n.to_string(),
                        reason: "number is not representable as a cluster count".to_string(),
                    }
                }
            }
            // Booleans count as 0 and 1.
            Value::Bool(b) => Self::Fixed(i64::from(*b)),
            Value::Sequence(seq) => Self::invalid_type(&format!("{seq:?}"), "sequence"),
            Value::Mapping(map) => Self::invalid_type(&format!("{map:?}"), "mapping"),
            Value::Tagged(tagged) => Self::invalid_type(&format!("{tagged:?}"), "tagged value"),
        };
        Some(setting)
    }

    /// Parse the textual form. Only a leading `+` or `-` followed by an
    /// integer is an offset; anything else is invalid. The integer may use
    /// full-width digits and single `_` separators between digits.
    pub fn parse_directive(raw: &str) -> Self {
        let (sign, rest) = if let Some(rest) = raw.strip_prefix('+') {
            (1i64, rest)
        } else if let Some(rest) = raw.strip_prefix('-') {
            (-1i64, rest)
        } else {
            return Self::Invalid {
                raw: raw.to_string(),
                reason: "offset must start with '+' or '-'".to_string(),
            };
        };

        let digits = match fold_integer_text(rest.trim()) {
            Some(digits) => digits,
            None => {
                return Self::Invalid {
                    raw: raw.to_string(),
                    reason: "offset is not an integer: misplaced '_' separator".to_string(),
                }
            }
        };

        match digits.parse::<i64>() {
            Ok(magnitude) => match magnitude.checked_mul(sign) {
                Some(offset) => Self::Offset(offset),
                None => Self::Invalid {
                    raw: raw.to_string(),
                    reason: "offset overflows".to_string(),
                },
            },
            Err(e) => Self::Invalid {
                raw: raw.to_string(),
                reason: format!("offset is not an integer: {e}"),
            },
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid { .. })
    }

    fn invalid_type(raw: &str, kind: &str) -> Self {
        Self::Invalid {
            raw: raw.to_string(),
            reason: format!("unsupported setting type: {kind}"),
        }
    }
}

/// Fold full-width digits to ASCII and drop `_` separators. A `_` must sit
/// between two digits; otherwise the text is rejected.
fn fold_integer_text(text: &str) -> Option<String> {
    let chars: Vec<char> = text
        .chars()
        .map(|c| match c {
            '\u{FF10}'..='\u{FF19}' => {
                char::from_u32(c as u32 - 0xFF10 + u32::from(b'0')).unwrap_or(c)
            }
            _ => c,
        })
        .collect();

    let mut folded = String::with_capacity(chars.len());
    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            let before = i.checked_sub(1).and_then(|j| chars.get(j));
            let after = chars.get(i + 1);
            let between_digits = matches!(before, Some(b) if b.is_ascii_digit())
                && matches!(after, Some(a) if a.is_ascii_digit());
            if !between_digits {
                return None;
            }
            continue;
        }
        folded.push(c);
    }
    Some(folded)
}

/// Company name → compiled directive. Lookup is exact string equality.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyOverrides {
    settings: HashMap<String, ClusterCountSetting>,
    diagnostics: Vec<String>,
}

impl CompanyOverrides {
    /// Compile the `company_cluster_settings` mapping.
    ///
    /// A missing or null section yields no overrides. A section that is not a
    /// mapping is a configuration error. Non-string keys can never match a
    /// company name and are skipped with a diagnostic.
    pub fn from_yaml(value: Option<&Value>) -> Result<Self, ConfigError> {
        let mapping = match value {
            None | Some(Value::Null) => return Ok(Self::default()),
            Some(Value::Mapping(m)) => m,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    field: "clustering.company_cluster_settings".to_string(),
                    message: format!("expected a mapping of company to setting, got {other:?}"),
                })
            }
        };

        let mut overrides = Self::default();
        for (key, raw) in mapping {
            let Value::String(company) = key else {
                overrides
                    .diagnostics
                    .push(format!("skipping non-string company key {key:?}"));
                continue;
            };
            let Some(setting) = ClusterCountSetting::from_yaml(raw) else {
                continue;
            };
            if let ClusterCountSetting::Invalid { raw, reason } = &setting {
                overrides
                    .diagnostics
                    .push(format!("{company}: invalid setting '{raw}': {reason}"));
            }
            overrides.settings.insert(company.clone(), setting);
        }
        Ok(overrides)
    }

    pub fn get(&self, company: &str) -> Option<&ClusterCountSetting> {
        self.settings.get(company)
    }

    /// Problems found while compiling, one line per entry.
    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }
}

impl FromIterator<(String, ClusterCountSetting)> for CompanyOverrides {
    fn from_iter<I: IntoIterator<Item = (String, ClusterCountSetting)>>(iter: I) -> Self {
        let mut overrides = Self::default();
        for (company, setting) in iter {
            if let ClusterCountSetting::Invalid { raw, reason } = &setting {
                overrides
                    .diagnostics
                    .push(format!("{company}: invalid setting '{raw}': {reason}"));
            }
            overrides.settings.insert(company, setting);
        }
        overrides
    }
}

/// Clustering section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusteringConfig {
    pub company_overrides: CompanyOverrides,
}
