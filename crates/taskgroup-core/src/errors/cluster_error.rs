//! Clustering algorithm errors.
//!
//! These never escape the engine: every variant is turned into a
//! single-cluster fallback for the affected company.

use super::error_code::{self, ErrorCode};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClusterError {
    #[error("empty vocabulary; documents contain no tokens")]
    EmptyVocabulary,

    #[error("non-finite distance {value} between items {i} and {j}")]
    NonFiniteDistance { i: usize, j: usize, value: f64 },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("cannot form {requested} clusters from {samples} samples")]
    TooManyClusters { requested: usize, samples: usize },

    #[error("cluster count must be at least 1")]
    ZeroClusters,
}

impl ErrorCode for ClusterError {
    fn error_code(&self) -> &'static str {
        error_code::CLUSTER_ERROR
    }
}
