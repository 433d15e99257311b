//! Per-company adjustment of the estimated cluster count.

use taskgroup_core::config::{ClusterCountSetting, CompanyOverrides};
use tracing::{info, warn};

/// Applies `clustering.company_cluster_settings` to estimated counts.
#[derive(Debug, Clone, Default)]
pub struct CompanyOverridePolicy {
    overrides: CompanyOverrides,
}

impl CompanyOverridePolicy {
    pub fn new(overrides: CompanyOverrides) -> Self {
        Self { overrides }
    }

    /// Final cluster count for `company`. Companies are matched by exact
    /// string equality. Never returns less than 1.
    pub fn resolve(&self, company: &str, default_count: usize) -> usize {
        let Some(setting) = self.overrides.get(company) else {
            info!(company, estimated = default_count, "no cluster-count override");
            return default_count.max(1);
        };

        let base = i64::try_from(default_count).unwrap_or(i64::MAX);
        let resolved = match setting {
            ClusterCountSetting::Offset(offset) => {
                let adjusted = base.saturating_add(*offset);
                info!(
                    company,
                    estimated = default_count,
                    offset = *offset,
                    adjusted,
                    "applied cluster-count offset"
                );
                adjusted
            }
            ClusterCountSetting::Fixed(count) => {
                info!(
                    company,
                    estimated = default_count,
                    fixed = *count,
                    "applied fixed cluster count"
                );
                *count
            }
            ClusterCountSetting::Invalid { raw, reason } => {
                warn!(
                    company,
                    setting = %raw,
                    reason = %reason,
                    "invalid cluster-count override, using estimate"
                );
                base
            }
        };

        usize::try_from(resolved.max(1)).unwrap_or(usize::MAX)
    }
}
