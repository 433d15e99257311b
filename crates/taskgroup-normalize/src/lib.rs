//! # taskgroup-normalize
//!
//! Collapses notational variance in task names before clustering:
//! spaces → period tags → phase terms → symbols → width → abbreviations.
//! The order is load-bearing; see [`TextNormalizer::normalize`].

pub mod normalizer;
pub mod patterns;

pub use normalizer::{to_full_width, NormalizeOptions, TextNormalizer};
