//! Point cost used to fill the DTW cost matrix.

use curvewarp_geom::metric::{distance, squared_distance};

/// Local cost of matching one vertex of each curve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PointCost {
    /// Euclidean distance between the matched vertices (`dtw`).
    #[default]
    Euclidean,

    /// Squared Euclidean distance between the matched vertices (`sdtw`).
    SquaredEuclidean,
}

impl PointCost {
    /// Evaluate the cost between two points of equal dimension.
    #[must_use]
    #[inline]
    pub fn eval(self, a: &[f64], b: &[f64]) -> f64 {
        match self {
            Self::Euclidean => distance(a, b),
            Self::SquaredEuclidean => squared_distance(a, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn euclidean_cost() {
        assert_eq!(PointCost::Euclidean.eval(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
    }

    #[test]
    fn squared_cost() {
        assert_eq!(PointCost::SquaredEuclidean.eval(&[0.0, 0.0], &[3.0, 4.0]), 25.0);
    }

    #[test]
    fn default_is_euclidean() {
        assert_eq!(PointCost::default(), PointCost::Euclidean);
    }
}
