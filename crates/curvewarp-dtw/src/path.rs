//! Warping path types for DTW alignment.

use serde::{Deserialize, Serialize};

/// A single step in a DTW warping path, mapping vertex `a` of the first curve
/// to vertex `b` of the second curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarpingStep {
    /// Vertex index in the first curve.
    pub a: usize,
    /// Vertex index in the second curve.
    pub b: usize,
}

/// An ordered sequence of warping steps from `(0, 0)` to `(n-1, m-1)`.
///
/// Empty when either input curve was empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarpingPath(Vec<WarpingStep>);

impl WarpingPath {
    /// Create a new warping path from a vector of steps.
    pub(crate) fn new(steps: Vec<WarpingStep>) -> Self {
        Self(steps)
    }

    /// Return the warping steps as a slice.
    #[must_use]
    pub fn steps(&self) -> &[WarpingStep] {
        &self.0
    }

    /// Return the number of steps in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true if the path contains no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the steps as plain `(a, b)` index pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(usize, usize)> {
        self.0.iter().map(|s| (s.a, s.b)).collect()
    }
}

impl<'a> IntoIterator for &'a WarpingPath {
    type Item = &'a WarpingStep;
    type IntoIter = std::slice::Iter<'a, WarpingStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_follow_steps() {
        let path = WarpingPath::new(vec![WarpingStep { a: 0, b: 0 }, WarpingStep { a: 1, b: 0 }]);
        assert_eq!(path.to_pairs(), vec![(0, 0), (1, 0)]);
        assert_eq!(path.len(), 2);
        assert!(!path.is_empty());
    }

    #[test]
    fn serializes_as_step_list() {
        let path = WarpingPath::new(vec![WarpingStep { a: 0, b: 0 }, WarpingStep { a: 1, b: 1 }]);
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, r#"[{"a":0,"b":0},{"a":1,"b":1}]"#);
        let back: WarpingPath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
    }
}
