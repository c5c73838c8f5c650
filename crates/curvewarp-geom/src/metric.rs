//! Point-to-point distances on coordinate slices.

/// Squared Euclidean distance between two points of equal dimension.
#[must_use]
#[inline]
pub fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Euclidean distance between two points of equal dimension.
#[must_use]
#[inline]
pub fn distance(a: &[f64], b: &[f64]) -> f64 {
    squared_distance(a, b).sqrt()
}

/// Dot product of the difference vectors `a - b` and `c - d`.
#[must_use]
#[inline]
pub fn diff_dot(a: &[f64], b: &[f64], c: &[f64], d: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .zip(c.iter().zip(d))
        .map(|((a, b), (c, d))| (a - b) * (c - d))
        .sum()
}
