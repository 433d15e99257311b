//! ClusteringEngine: per-company orchestration.
//!
//! Rows are grouped by company in order of first appearance. Each company is
//! clustered independently; failures collapse that company to one cluster and
//! are reported through [`ClusterOutcome`] instead of an error.

use std::fmt;

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use taskgroup_core::config::CompanyOverrides;
use taskgroup_core::errors::ClusterError;
use taskgroup_core::records::{AnnotatedRecord, NormalizedRecord};
use tracing::{debug, info, warn};

use crate::algorithms::{CondensedDistances, Dendrogram, SparseVector, TfidfVectorizer};
use crate::estimator;
use crate::policy::CompanyOverridePolicy;

/// Why a company was collapsed into a single cluster.
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackReason {
    /// No document produced a token.
    Vectorization(ClusterError),
    /// Distance matrix, linkage or flat cut failed.
    Clustering(ClusterError),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vectorization(e) => write!(f, "vectorization failed: {e}"),
            Self::Clustering(e) => write!(f, "clustering failed: {e}"),
        }
    }
}

/// Which path a company batch took.
#[derive(Debug, Clone, PartialEq)]
pub enum ClusterOutcome {
    /// Zero or one row; nothing to vectorize.
    Trivial,
    Clustered { estimated: usize, resolved: usize },
    FellBackToSingleCluster(FallbackReason),
}

impl ClusterOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::FellBackToSingleCluster(_))
    }
}

/// Summary of one company batch.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyReport {
    pub company: String,
    pub rows: usize,
    pub outcome: ClusterOutcome,
    /// Distinct cluster ids actually assigned.
    pub cluster_count: usize,
}

/// Annotated rows plus one report per company, both in company
/// first-appearance order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusteringReport {
    pub records: Vec<AnnotatedRecord>,
    pub companies: Vec<CompanyReport>,
}

impl ClusteringReport {
    pub fn total_clusters(&self) -> usize {
        self.companies.iter().map(|c| c.cluster_count).sum()
    }

    pub fn fallback_count(&self) -> usize {
        self.companies.iter().filter(|c| c.outcome.is_fallback()).count()
    }

    pub fn company(&self, name: &str) -> Option<&CompanyReport> {
        self.companies.iter().find(|c| c.company == name)
    }
}

/// Clusters normalized records company by company.
#[derive(Debug, Clone, Default)]
pub struct ClusteringEngine {
    policy: CompanyOverridePolicy,
}

impl ClusteringEngine {
    pub fn new(overrides: CompanyOverrides) -> Self {
        Self {
            policy: CompanyOverridePolicy::new(overrides),
        }
    }

    /// Annotate every record. Output keeps each row exactly once: companies in
    /// first-appearance order, rows within a company in input order.
    pub fn cluster(&self, records: Vec<NormalizedRecord>) -> ClusteringReport {
        let batches = group_by_company(records);
        info!(companies = batches.len(), "clustering started");

        let results: Vec<(Vec<AnnotatedRecord>, CompanyReport)> = batches
            .into_par_iter()
            .map(|(company, batch)| self.cluster_company(&company, batch))
            .collect();

        let mut report = ClusteringReport::default();
        for (records, company) in results {
            report.records.extend(records);
            report.companies.push(company);
        }

        info!(
            rows = report.records.len(),
            clusters = report.total_clusters(),
            fallbacks = report.fallback_count(),
            "clustering finished"
        );
        report
    }

    /// Cluster a single company's rows.
    pub fn cluster_company(
        &self,
        company: &str,
        batch: Vec<NormalizedRecord>,
    ) -> (Vec<AnnotatedRecord>, CompanyReport) {
        let rows = batch.len();
        debug!(company, rows, "clustering company");

        let (annotated, outcome) = if rows <= 1 {
            info!(company, rows, "single-row batch, clustering skipped");
            let labels = vec![0; rows];
            (annotate(batch, &labels), ClusterOutcome::Trivial)
        } else {
            self.cluster_batch(company, batch)
        };

        let cluster_count = annotated
            .iter()
            .map(|r| r.cluster_id)
            .max()
            .unwrap_or(0) as usize;
        info!(company, rows, clusters = cluster_count, "company clustered");

        let report = CompanyReport {
            company: company.to_string(),
            rows,
            outcome,
            cluster_count,
        };
        (annotated, report)
    }

    fn cluster_batch(
        &self,
        company: &str,
        batch: Vec<NormalizedRecord>,
    ) -> (Vec<AnnotatedRecord>, ClusterOutcome) {
        let mut vectorizer = TfidfVectorizer::new();
        let texts: Vec<&str> = batch.iter().map(|r| r.normalized.as_str()).collect();
        let vectors = match vectorizer.fit_transform(&texts) {
            Ok(vectors) => vectors,
            Err(e) => {
                warn!(company, error = %e, "vectorization failed, assigning a single cluster");
                let reason = FallbackReason::Vectorization(e);
                return (
                    single_cluster_named_by_first(batch),
                    ClusterOutcome::FellBackToSingleCluster(reason),
                );
            }
        };

        match self.hierarchical(company, &vectors) {
            Ok((labels, estimated, resolved)) => (
                annotate(batch, &labels),
                ClusterOutcome::Clustered {
                    estimated,
                    resolved,
                },
            ),
            Err(e) => {
                warn!(company, error = %e, "clustering failed, assigning a single cluster");
                let labels = vec![0; batch.len()];
                (
                    annotate(batch, &labels),
                    ClusterOutcome::FellBackToSingleCluster(FallbackReason::Clustering(e)),
                )
            }
        }
    }

    /// Distances → average linkage → estimated and resolved count → flat cut.
    fn hierarchical(
        &self,
        company: &str,
        vectors: &[SparseVector],
    ) -> Result<(Vec<usize>, usize, usize), ClusterError> {
        let distances = CondensedDistances::from_vectors(vectors)?;
        let dendrogram = Dendrogram::average(&distances);
        let estimated = estimator::estimate(&dendrogram.distances(), vectors.len());
        let resolved = self.policy.resolve(company, estimated);
        let labels = dendrogram.cut(resolved)?;
        Ok((labels, estimated, resolved))
    }
}

/// Most frequent name; ties go to the one encountered first.
pub fn representative_name(names: &[&str]) -> String {
    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    for name in names {
        *counts.entry(*name).or_insert(0) += 1;
    }
    let mut best: Option<(&str, usize)> = None;
    for name in names {
        let count = counts.get(name).copied().unwrap_or(0);
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((*name, count));
        }
    }
    best.map(|(name, _)| name.to_string()).unwrap_or_default()
}

fn group_by_company(records: Vec<NormalizedRecord>) -> Vec<(String, Vec<NormalizedRecord>)> {
    let mut slots: FxHashMap<String, usize> = FxHashMap::default();
    let mut batches: Vec<(String, Vec<NormalizedRecord>)> = Vec::new();
    for record in records {
        let slot = match slots.get(&record.record.company) {
            Some(&slot) => slot,
            None => {
                let slot = batches.len();
                slots.insert(record.record.company.clone(), slot);
                batches.push((record.record.company.clone(), Vec::new()));
                slot
            }
        };
        batches[slot].1.push(record);
    }
    batches
}

/// Renumber labels from 1 by first appearance and attach representatives.
fn annotate(batch: Vec<NormalizedRecord>, labels: &[usize]) -> Vec<AnnotatedRecord> {
    let mut ids: FxHashMap<usize, u32> = FxHashMap::default();
    let cluster_ids: Vec<u32> = labels
        .iter()
        .map(|&label| {
            let next = ids.len() as u32 + 1;
            *ids.entry(label).or_insert(next)
        })
        .collect();

    let mut members: FxHashMap<u32, Vec<&str>> = FxHashMap::default();
    for (record, &id) in batch.iter().zip(&cluster_ids) {
        members
            .entry(id)
            .or_default()
            .push(record.record.task_name.as_str());
    }
    let representatives: FxHashMap<u32, String> = members
        .into_iter()
        .map(|(id, names)| (id, representative_name(&names)))
        .collect();

    batch
        .into_iter()
        .zip(cluster_ids)
        .map(|(normalized, cluster_id)| {
            let representative_name = representatives
                .get(&cluster_id)
                .cloned()
                .unwrap_or_else(|| normalized.record.task_name.clone());
            AnnotatedRecord {
                record: normalized.record,
                cluster_id,
                representative_name,
            }
        })
        .collect()
}

/// Vectorization fallback: one cluster labelled with the first row's name.
fn single_cluster_named_by_first(batch: Vec<NormalizedRecord>) -> Vec<AnnotatedRecord> {
    let representative_name = batch
        .first()
        .map(|r| r.record.task_name.clone())
        .unwrap_or_default();
    batch
        .into_iter()
        .map(|normalized| AnnotatedRecord {
            record: normalized.record,
            cluster_id: 1,
            representative_name: representative_name.clone(),
        })
        .collect()
}
