//! Average-linkage hierarchical clustering over a condensed distance matrix.
//!
//! Merges are found with the nearest-neighbour chain algorithm, sorted by
//! distance (stable), then relabelled so that merge `i` creates node
//! `n + i`. Leaves are nodes `0..n`.

use taskgroup_core::errors::ClusterError;

use super::similarity::{condensed_index, CondensedDistances};

/// One merge step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Merge {
    /// Smaller of the two merged node ids.
    pub left: usize,
    pub right: usize,
    /// Average pairwise distance between the two merged clusters.
    pub distance: f64,
    /// Leaves under the new node.
    pub size: usize,
}

/// `n - 1` merges, ascending by distance.
#[derive(Debug, Clone, PartialEq)]
pub struct Dendrogram {
    n_samples: usize,
    merges: Vec<Merge>,
}

impl Dendrogram {
    /// Build the average-linkage tree. Fewer than two samples yield no merges.
    pub fn average(distances: &CondensedDistances) -> Self {
        let n = distances.n_samples();
        if n < 2 {
            return Self {
                n_samples: n,
                merges: Vec::new(),
            };
        }

        let mut d = distances.values().to_vec();
        // size[i] == 0 marks a slot absorbed by an earlier merge.
        let mut size = vec![1usize; n];
        let mut chain: Vec<usize> = Vec::with_capacity(n);
        let mut merges = Vec::with_capacity(n - 1);

        for _ in 0..n - 1 {
            if chain.is_empty() {
                if let Some(first) = (0..n).find(|&i| size[i] > 0) {
                    chain.push(first);
                }
            }

            let (x, y, distance) = loop {
                let x = chain[chain.len() - 1];
                let (mut y, mut current_min) = if chain.len() > 1 {
                    let previous = chain[chain.len() - 2];
                    (previous, d[condensed_index(n, x, previous)])
                } else {
                    (x, f64::INFINITY)
                };

                for i in 0..n {
                    if size[i] == 0 || i == x {
                        continue;
                    }
                    let dist = d[condensed_index(n, x, i)];
                    if dist < current_min {
                        current_min = dist;
                        y = i;
                    }
                }

                if chain.len() > 1 && y == chain[chain.len() - 2] {
                    break (x, y, current_min);
                }
                chain.push(y);
            };

            chain.truncate(chain.len() - 2);
            let (x, y) = if x > y { (y, x) } else { (x, y) };
            let (nx, ny) = (size[x], size[y]);
            merges.push(Merge {
                left: x,
                right: y,
                distance,
                size: nx + ny,
            });

            // The merged cluster lives on in slot y.
            size[x] = 0;
            size[y] = nx + ny;
            for i in 0..n {
                if size[i] == 0 || i == y {
                    continue;
                }
                let d_xi = d[condensed_index(n, i, x)];
                let d_yi = d[condensed_index(n, i, y)];
                d[condensed_index(n, i, y)] =
                    (nx as f64 * d_xi + ny as f64 * d_yi) / (nx + ny) as f64;
            }
        }

        merges.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        relabel(n, &mut merges);

        Self {
            n_samples: n,
            merges,
        }
    }

    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    pub fn merges(&self) -> &[Merge] {
        &self.merges
    }

    /// Merge distances in merge order (ascending).
    pub fn distances(&self) -> Vec<f64> {
        self.merges.iter().map(|m| m.distance).collect()
    }

    /// Flat labels for exactly `n_clusters` clusters, by undoing the last
    /// `n_clusters - 1` merges. Labels are zero-based in order of first
    /// appearance.
    pub fn cut(&self, n_clusters: usize) -> Result<Vec<usize>, ClusterError> {
        let n = self.n_samples;
        if n_clusters == 0 {
            return Err(ClusterError::ZeroClusters);
        }
        if n_clusters > n {
            return Err(ClusterError::TooManyClusters {
                requested: n_clusters,
                samples: n,
            });
        }

        let mut parent: Vec<usize> = (0..2 * n).collect();
        for (step, merge) in self.merges.iter().take(n - n_clusters).enumerate() {
            parent[merge.left] = n + step;
            parent[merge.right] = n + step;
        }

        let mut labels = Vec::with_capacity(n);
        let mut roots: Vec<usize> = Vec::with_capacity(n_clusters);
        for leaf in 0..n {
            let mut node = leaf;
            while parent[node] != node {
                node = parent[node];
            }
            let label = match roots.iter().position(|&r| r == node) {
                Some(label) => label,
                None => {
                    roots.push(node);
                    roots.len() - 1
                }
            };
            labels.push(label);
        }
        Ok(labels)
    }
}

/// Rewrite slot-based merges into node ids: merge `i` creates node `n + i`.
fn relabel(n: usize, merges: &mut [Merge]) {
    let mut uf = LinkageUnionFind::new(n);
    for merge in merges.iter_mut() {
        let (a, b) = (uf.find(merge.left), uf.find(merge.right));
        let (left, right) = if a < b { (a, b) } else { (b, a) };
        merge.left = left;
        merge.right = right;
        merge.size = uf.merge(left, right);
    }
}

struct LinkageUnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
    next_label: usize,
}

impl LinkageUnionFind {
    fn new(n: usize) -> Self {
        let mut size = vec![0; 2 * n - 1];
        size[..n].fill(1);
        Self {
            parent: (0..2 * n - 1).collect(),
            size,
            next_label: n,
        }
    }

    fn merge(&mut self, x: usize, y: usize) -> usize {
        let label = self.next_label;
        self.parent[x] = label;
        self.parent[y] = label;
        let size = self.size[x] + self.size[y];
        self.size[label] = size;
        self.next_label += 1;
        size
    }

    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }
}
