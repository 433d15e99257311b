//! TF-IDF vectors over normalized task names.
//!
//! Raw term counts, smoothed idf `ln((1 + n) / (1 + df)) + 1`, every row
//! scaled to unit length. Tokens are maximal runs of word characters,
//! lowercased; single-character tokens count.

use rustc_hash::FxHashMap;
use taskgroup_core::errors::ClusterError;

/// Sparse row: `(term index, weight)` pairs sorted by term index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build from pairs with unique term indices, in any order.
    pub fn from_entries(mut entries: Vec<(usize, f64)>) -> Self {
        entries.sort_by_key(|&(index, _)| index);
        Self { entries }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Euclidean length.
    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Dot product by merging the two sorted index lists.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// Fitted vocabulary and idf weights for one company batch.
#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    vocabulary: FxHashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn the vocabulary and idf from `documents` and return one unit
    /// vector per document, in input order.
    ///
    /// Fails with [`ClusterError::EmptyVocabulary`] when no document yields a
    /// single token. A document with no tokens of its own becomes an empty
    /// vector.
    pub fn fit_transform<S: AsRef<str>>(
        &mut self,
        documents: &[S],
    ) -> Result<Vec<SparseVector>, ClusterError> {
        self.vocabulary.clear();
        let mut term_counts: Vec<FxHashMap<usize, usize>> = Vec::with_capacity(documents.len());

        for document in documents {
            let mut counts: FxHashMap<usize, usize> = FxHashMap::default();
            for token in tokenize(document.as_ref()) {
                let next = self.vocabulary.len();
                let index = *self.vocabulary.entry(token).or_insert(next);
                *counts.entry(index).or_insert(0) += 1;
            }
            term_counts.push(counts);
        }

        if self.vocabulary.is_empty() {
            return Err(ClusterError::EmptyVocabulary);
        }

        let mut document_frequency = vec![0usize; self.vocabulary.len()];
        for counts in &term_counts {
            for &index in counts.keys() {
                document_frequency[index] += 1;
            }
        }

        let n_docs = documents.len() as f64;
        self.idf = document_frequency
            .iter()
            .map(|&df| ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        Ok(term_counts
            .into_iter()
            .map(|counts| {
                let weighted: Vec<(usize, f64)> = counts
                    .into_iter()
                    .map(|(index, count)| (index, count as f64 * self.idf[index]))
                    .collect();
                l2_normalize(SparseVector::from_entries(weighted))
            })
            .collect())
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Learned idf for a (lowercased) term.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&index| self.idf[index])
    }
}

/// Split into lowercased runs of alphanumeric characters and underscores.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn l2_normalize(vector: SparseVector) -> SparseVector {
    let norm = vector.norm();
    if norm < f64::EPSILON {
        return vector;
    }
    SparseVector {
        entries: vector
            .entries
            .into_iter()
            .map(|(index, weight)| (index, weight / norm))
            .collect(),
    }
}
