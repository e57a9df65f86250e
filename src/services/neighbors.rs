use std::cmp::Ordering;

use super::interactions::InteractionMatrix;

/// One k-nearest-neighbour hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Row in the indexed matrix
    pub row: usize,
    /// Cosine distance to the query row, `1 - similarity`
    pub distance: f32,
}

/// Nearest-neighbour lookup over interaction-matrix rows
///
/// Results are ordered by ascending distance, equal distances by ascending row.
/// The query row itself is not excluded: it comes back at distance 0 and the
/// caller removes it by identity.
#[cfg_attr(test, mockall::automock)]
pub trait NeighborIndex: Send + Sync {
    /// The `k` rows closest to `row`; `k` is clamped to the row count
    fn k_nearest(&self, row: usize, k: usize) -> Vec<Neighbor>;

    /// Number of indexed rows
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Exact, exhaustive cosine-distance search over dense rows
pub struct BruteForceIndex {
    rows: Vec<Vec<f32>>,
    norms: Vec<f32>,
}

impl BruteForceIndex {
    pub fn new(matrix: &InteractionMatrix) -> Self {
        let rows = matrix.rows().to_vec();
        let norms = rows
            .iter()
            .map(|r| r.iter().map(|x| x * x).sum::<f32>().sqrt())
            .collect();
        Self { rows, norms }
    }

    fn distance(&self, a: usize, b: usize) -> f32 {
        let (norm_a, norm_b) = (self.norms[a], self.norms[b]);
        if norm_a == 0.0 || norm_b == 0.0 {
            return 1.0;
        }
        let dot: f32 = self.rows[a]
            .iter()
            .zip(&self.rows[b])
            .map(|(x, y)| x * y)
            .sum();
        // rounding can push similarity just above 1
        (1.0 - dot / (norm_a * norm_b)).max(0.0)
    }
}

impl NeighborIndex for BruteForceIndex {
    fn k_nearest(&self, row: usize, k: usize) -> Vec<Neighbor> {
        if row >= self.rows.len() {
            return Vec::new();
        }

        let mut hits: Vec<Neighbor> = (0..self.rows.len())
            .map(|other| Neighbor {
                row: other,
                distance: if other == row { 0.0 } else { self.distance(row, other) },
            })
            .collect();

        hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(Ordering::Equal)
                .then(a.row.cmp(&b.row))
        });
        hits.truncate(k);
        hits
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}
