//! Coupling paths for continuous curve alignment.

use serde::{Deserialize, Serialize};

/// A point of the free-space diagram: arclength `a` along the first curve
/// coupled with arclength `b` along the second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CouplingPoint {
    /// Arclength parameter on the first curve.
    pub a: f64,
    /// Arclength parameter on the second curve.
    pub b: f64,
}

impl CouplingPoint {
    /// The origin of the free-space diagram.
    pub const ORIGIN: Self = Self { a: 0.0, b: 0.0 };

    pub(crate) fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    /// Shift a cell-local point into the frame whose origin is `origin`.
    pub(crate) fn offset(self, origin: Self) -> Self {
        Self {
            a: self.a + origin.a,
            b: self.b + origin.b,
        }
    }
}

/// Vertices of a piecewise-linear coupling, from `(0, 0)` to
/// `(length(P), length(Q))`, non-decreasing in both coordinates.
///
/// The coupling between consecutive vertices is linear. Empty when either
/// input curve was empty; a single origin vertex when both were single points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CouplingPath(Vec<CouplingPoint>);

impl CouplingPath {
    pub(crate) fn new(points: Vec<CouplingPoint>) -> Self {
        Self(points)
    }

    /// Return the path vertices as a slice.
    #[must_use]
    pub fn points(&self) -> &[CouplingPoint] {
        &self.0
    }

    /// Return the number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true if the path has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the vertices as plain `(a, b)` pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(f64, f64)> {
        self.0.iter().map(|p| (p.a, p.b)).collect()
    }

    /// Consume and return the vertex vector.
    #[must_use]
    pub fn into_inner(self) -> Vec<CouplingPoint> {
        self.0
    }
}

impl<'a> IntoIterator for &'a CouplingPath {
    type Item = &'a CouplingPoint;
    type IntoIter = std::slice::Iter<'a, CouplingPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
