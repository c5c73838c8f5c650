//! Lower-triangular distance matrix for pairwise curve dissimilarities.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Symmetric distance matrix stored as a lower-triangular flat vector.
///
/// For `n` curves, stores `n*(n-1)/2` distances. Access is symmetric:
/// `get(i, j) == get(j, i)`. Diagonal is always zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Create a matrix from pre-computed lower-triangular data.
    ///
    /// `data` must contain exactly `n*(n-1)/2` elements, stored as
    /// `data[row*(row-1)/2 + col]` where `row > col`.
    #[must_use]
    pub fn from_raw(n: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), n * n.saturating_sub(1) / 2);
        Self { n, data }
    }

    /// Fill the lower triangle by evaluating `f(i, j)` for every `i > j` in parallel.
    pub fn par_from_fn<F>(n: usize, f: F) -> Self
    where
        F: Fn(usize, usize) -> f64 + Sync,
    {
        let total_pairs = n * n.saturating_sub(1) / 2;
        let data: Vec<f64> = (0..total_pairs)
            .into_par_iter()
            .map(|flat_idx| {
                let (i, j) = unflatten(flat_idx);
                f(i, j)
            })
            .collect();
        Self::from_raw(n, data)
    }

    /// Return the number of curves in the matrix.
    #[must_use]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Return true if the matrix is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Return the distance between curve `i` and curve `j`.
    ///
    /// Returns zero for `i == j`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= n` or `j >= n`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.n, "row index {i} out of bounds for matrix of size {}", self.n);
        assert!(j < self.n, "column index {j} out of bounds for matrix of size {}", self.n);
        if i == j {
            return 0.0;
        }
        let (row, col) = if i > j { (i, j) } else { (j, i) };
        self.data[row * (row - 1) / 2 + col]
    }

    /// Iterate over all unique pairs `(i, j, distance)` where `i > j`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (1..self.n).flat_map(move |i| (0..i).map(move |j| (i, j, self.data[i * (i - 1) / 2 + j])))
    }

    /// Return all distances from curve `i` to every curve, including itself.
    #[must_use]
    pub fn row(&self, i: usize) -> Vec<f64> {
        (0..self.n).map(|j| self.get(i, j)).collect()
    }
}

/// Map a flat lower-triangle index back to `(i, j)` with `i > j`.
///
/// `flat_idx = i*(i-1)/2 + j`, so `i = floor((1 + sqrt(1 + 8*flat_idx)) / 2)`.
/// The float estimate is corrected by one step in either direction.
fn unflatten(flat_idx: usize) -> (usize, usize) {
    let mut i = ((1.0 + (1.0 + 8.0 * flat_idx as f64).sqrt()) / 2.0).floor() as usize;
    while i * (i - 1) / 2 > flat_idx {
        i -= 1;
    }
    while (i + 1) * i / 2 <= flat_idx {
        i += 1;
    }
    (i, flat_idx - i * (i - 1) / 2)
}
