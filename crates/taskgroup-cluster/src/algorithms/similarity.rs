//! Cosine similarity and the condensed pairwise distance matrix.

use taskgroup_core::errors::ClusterError;

use super::tfidf::SparseVector;

/// Cosine similarity between two sparse vectors.
/// Returns 0.0 when either vector has zero magnitude.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let denom = a.norm() * b.norm();
    if denom < f64::EPSILON {
        0.0
    } else {
        (a.dot(b) / denom).clamp(-1.0, 1.0)
    }
}

/// Upper triangle of a symmetric distance matrix, row-major, diagonal
/// omitted: `(0,1), (0,2), …, (0,n-1), (1,2), …`.
#[derive(Debug, Clone, PartialEq)]
pub struct CondensedDistances {
    n: usize,
    values: Vec<f64>,
}

impl CondensedDistances {
    /// Cosine distance `1 - similarity` for every pair of rows.
    pub fn from_vectors(vectors: &[SparseVector]) -> Result<Self, ClusterError> {
        let n = vectors.len();
        let mut values = Vec::with_capacity(pair_count(n));
        for i in 0..n {
            for j in (i + 1)..n {
                values.push(1.0 - cosine_similarity(&vectors[i], &vectors[j]));
            }
        }
        Self::from_values(n, values)
    }

    /// Wrap precomputed values, checking shape and finiteness.
    pub fn from_values(n: usize, values: Vec<f64>) -> Result<Self, ClusterError> {
        let expected = pair_count(n);
        if values.len() != expected {
            return Err(ClusterError::DimensionMismatch {
                expected,
                actual: values.len(),
            });
        }
        let mut k = 0;
        for i in 0..n {
            for j in (i + 1)..n {
                let value = values[k];
                if !value.is_finite() {
                    return Err(ClusterError::NonFiniteDistance { i, j, value });
                }
                k += 1;
            }
        }
        Ok(Self { n, values })
    }

    pub fn n_samples(&self) -> usize {
        self.n
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Distance between samples `i` and `j`; zero on the diagonal.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        if i == j {
            0.0
        } else {
            self.values[condensed_index(self.n, i, j)]
        }
    }
}

/// Number of unordered pairs among `n` samples.
pub(crate) fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Position of pair `(i, j)`, `i != j`, in a condensed matrix of `n` samples.
pub(crate) fn condensed_index(n: usize, i: usize, j: usize) -> usize {
    let (i, j) = if i < j { (i, j) } else { (j, i) };
    n * i - i * (i + 1) / 2 + (j - i - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(entries: Vec<(usize, f64)>) -> SparseVector {
        SparseVector::from_entries(entries)
    }

    #[test]
    fn identical_vectors_have_similarity_one() {
        let v = unit(vec![(0, 1.0), (2, 3.0)]);
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn disjoint_vectors_have_similarity_zero() {
        let a = unit(vec![(0, 1.0)]);
        let b = unit(vec![(1, 1.0)]);
        assert!(cosine_similarity(&a, &b).abs() < 1e-9);
    }

    #[test]
    fn zero_vector_returns_zero() {
        let a = SparseVector::default();
        let b = unit(vec![(0, 1.0)]);
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn distances_are_one_minus_similarity() {
        let rows = vec![
            unit(vec![(0, 1.0)]),
            unit(vec![(0, 1.0)]),
            unit(vec![(1, 1.0)]),
            SparseVector::default(),
        ];
        let d = CondensedDistances::from_vectors(&rows).unwrap();
        assert_eq!(d.n_samples(), 4);
        assert_eq!(d.values().len(), 6);
        assert!(d.get(0, 1).abs() < 1e-12);
        assert!((d.get(0, 2) - 1.0).abs() < 1e-12);
        assert!((d.get(3, 0) - 1.0).abs() < 1e-12);
        assert_eq!(d.get(2, 2), 0.0);
    }

    #[test]
    fn every_pair_matches_pairwise_similarity() {
        let rows = vec![
            unit(vec![(0, 0.6), (1, 0.8)]),
            unit(vec![(1, 1.0)]),
            unit(vec![(0, 1.0), (2, 1.0)]),
        ];
        let d = CondensedDistances::from_vectors(&rows).unwrap();
        for i in 0..rows.len() {
            for j in (i + 1)..rows.len() {
                let expected = 1.0 - cosine_similarity(&rows[i], &rows[j]);
                assert!((d.get(i, j) - expected).abs() < 1e-12, "pair ({i}, {j})");
            }
        }
    }

    #[test]
    fn condensed_index_walks_upper_triangle() {
        let n = 4;
        let mut expected = 0;
        for i in 0..n {
            for j in (i + 1)..n {
                assert_eq!(condensed_index(n, i, j), expected);
                assert_eq!(condensed_index(n, j, i), expected);
                expected += 1;
            }
        }
    }

    #[test]
    fn rejects_wrong_length() {
        let err = CondensedDistances::from_values(3, vec![0.5, 0.5]).unwrap_err();
        assert_eq!(
            err,
            ClusterError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn rejects_non_finite_values() {
        let err = CondensedDistances::from_values(3, vec![0.5, f64::NAN, 0.5]).unwrap_err();
        assert!(matches!(
            err,
            ClusterError::NonFiniteDistance { i: 0, j: 2, .. }
        ));
    }

    #[test]
    fn degenerate_sizes_are_empty() {
        assert!(CondensedDistances::from_values(0, vec![]).is_ok());
        assert!(CondensedDistances::from_values(1, vec![]).is_ok());
    }
}
