pub mod linkage;
pub mod similarity;
pub mod tfidf;

pub use linkage::{Dendrogram, Merge};
pub use similarity::{cosine_similarity, CondensedDistances};
pub use tfidf::{SparseVector, TfidfVectorizer};
