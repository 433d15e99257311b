//! Cluster-count inference from a dendrogram's merge-distance profile.
//!
//! The cut goes where consecutive merge distances jump the most; the result
//! is clamped to `[2, max(2, n / 2)]`.

/// Lower bound once there are enough samples to split.
pub const MIN_CLUSTERS: usize = 2;

/// Estimate a cluster count for `sample_count` items from ascending merge
/// distances.
pub fn estimate(merge_distances: &[f64], sample_count: usize) -> usize {
    if sample_count <= 2 {
        return 1;
    }

    let estimated = if merge_distances.len() > 1 {
        merge_distances.len() - largest_gap_index(merge_distances)
    } else {
        1
    };

    let max_clusters = MIN_CLUSTERS.max(sample_count / 2);
    estimated.clamp(MIN_CLUSTERS, max_clusters)
}

/// Index `i` of the largest `distances[i + 1] - distances[i]`; first wins on ties.
fn largest_gap_index(distances: &[f64]) -> usize {
    let mut best = 0;
    let mut best_gap = f64::NEG_INFINITY;
    for (i, pair) in distances.windows(2).enumerate() {
        let gap = pair[1] - pair[0];
        if gap > best_gap {
            best_gap = gap;
            best = i;
        }
    }
    best
}
