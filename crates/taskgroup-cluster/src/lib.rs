//! # taskgroup-cluster
//!
//! Groups normalized task names per company:
//! TF-IDF → cosine distance → average-linkage dendrogram → estimated count
//! → per-company override → flat cut → cluster ids and representative names.

pub mod algorithms;
pub mod engine;
pub mod estimator;
pub mod policy;

pub use engine::{ClusterOutcome, ClusteringEngine, ClusteringReport, CompanyReport, FallbackReason};
