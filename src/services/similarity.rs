use serde::{Deserialize, Serialize};

use super::features::FeatureMatrix;

/// Cosine similarity of two equal-length vectors, 0 when either has zero norm
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// All-pairs content similarity, indexed by catalog row on both axes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    /// Row-major `size * size` cells
    cells: Vec<f64>,
}

impl SimilarityMatrix {
    /// Computes the full pairwise matrix, O(n² · d)
    ///
    /// Only the upper triangle is computed; the lower one is mirrored from it.
    pub fn build(features: &FeatureMatrix) -> Self {
        let size = features.n_items();
        let mut cells = vec![0.0; size * size];

        for i in 0..size {
            let row_i = features.row(i);
            let is_zero = row_i.iter().all(|&x| x == 0.0);
            cells[i * size + i] = if is_zero { 0.0 } else { 1.0 };

            for j in (i + 1)..size {
                let sim = cosine_similarity(row_i, features.row(j));
                cells[i * size + j] = sim;
                cells[j * size + i] = sim;
            }
        }

        tracing::debug!(items = size, "Built content similarity matrix");

        Self { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.cells[i * self.size + j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.cells[i * self.size..(i + 1) * self.size]
    }

    /// Whether the cell buffer matches the declared size
    pub fn is_well_formed(&self) -> bool {
        self.cells.len() == self.size * self.size
    }
}
