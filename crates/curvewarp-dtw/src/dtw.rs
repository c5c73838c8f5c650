//! DTW distance computation.

use curvewarp_geom::{Curve, CurveError, CurveView, DistanceMatrix, sanitize_all, sanitize_pair};
use tracing::{debug, instrument};

use crate::cost::PointCost;
use crate::path::{WarpingPath, WarpingStep};

// Direction bytes for traceback, listed in tie-break preference order.
const FROM_ABOVE: u8 = 0;
const FROM_LEFT: u8 = 1;
const FROM_DIAG: u8 = 2;

/// Immutable DTW configuration. Thread-safe and copyable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dtw {
    cost: PointCost,
}

impl Dtw {
    /// Create a DTW calculator summing Euclidean vertex distances.
    #[must_use]
    pub fn euclidean() -> Self {
        Self {
            cost: PointCost::Euclidean,
        }
    }

    /// Create a DTW calculator summing squared Euclidean vertex distances.
    #[must_use]
    pub fn squared() -> Self {
        Self {
            cost: PointCost::SquaredEuclidean,
        }
    }

    /// Create a DTW calculator from an existing [`PointCost`].
    #[must_use]
    pub fn with_cost(cost: PointCost) -> Self {
        Self { cost }
    }

    /// Return the point cost configuration.
    #[must_use]
    pub fn cost(&self) -> PointCost {
        self.cost
    }

    /// Compute the accumulated DTW cost between two curves.
    ///
    /// Uses a rolling two-row buffer rather than allocating the full cost
    /// matrix: O(n * m) time, O(m) space. Returns `NaN` when either curve is
    /// empty.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::DimensionMismatch`] if the curves live in
    /// different spaces.
    #[instrument(skip(a, b), fields(n = a.len(), m = b.len()))]
    pub fn distance(&self, a: CurveView<'_>, b: CurveView<'_>) -> Result<f64, CurveError> {
        sanitize_pair(a, b)?;
        if a.is_empty() || b.is_empty() {
            debug!("empty curve, distance undefined");
            return Ok(f64::NAN);
        }
        Ok(self.accumulate_rolling(a, b))
    }

    /// Compute the accumulated DTW cost and the optimal warping path.
    ///
    /// Allocates the full cost matrix and a direction array for traceback.
    /// Returns `(NaN, empty path)` when either curve is empty.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::DimensionMismatch`] if the curves live in
    /// different spaces.
    #[instrument(skip(a, b), fields(n = a.len(), m = b.len()))]
    pub fn distance_and_path(
        &self,
        a: CurveView<'_>,
        b: CurveView<'_>,
    ) -> Result<(f64, WarpingPath), CurveError> {
        sanitize_pair(a, b)?;
        if a.is_empty() || b.is_empty() {
            debug!("empty curve, distance undefined");
            return Ok((f64::NAN, WarpingPath::default()));
        }
        let (dist, steps) = self.accumulate_full(a, b);
        Ok((dist, WarpingPath::new(steps)))
    }

    /// Compute pairwise DTW distances for a collection of curves.
    ///
    /// Returns a symmetric [`DistanceMatrix`] containing distances for all
    /// unique pairs. Computation is parallelized across pairs using rayon.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::DimensionMismatch`] if any curve differs in
    /// dimension from the first.
    #[instrument(skip(self, curves), fields(n = curves.len()))]
    pub fn pairwise(&self, curves: &[Curve]) -> Result<DistanceMatrix, CurveError> {
        sanitize_all(curves)?;
        let views: Vec<CurveView<'_>> = curves.iter().map(Curve::as_view).collect();
        Ok(DistanceMatrix::par_from_fn(views.len(), |i, j| {
            let (a, b) = (views[i], views[j]);
            if a.is_empty() || b.is_empty() {
                f64::NAN
            } else {
                self.accumulate_rolling(a, b)
            }
        }))
    }

    /// Rolling two-row buffer DTW, distance only. Both curves non-empty.
    fn accumulate_rolling(&self, a: CurveView<'_>, b: CurveView<'_>) -> f64 {
        let n = a.len();
        let m = b.len();

        let mut prev = vec![f64::INFINITY; m];
        let mut curr = vec![f64::INFINITY; m];

        for i in 0..n {
            let pa = a.point(i);
            for j in 0..m {
                let c = self.cost.eval(pa, b.point(j));
                if i == 0 && j == 0 {
                    curr[j] = c;
                    continue;
                }

                let above = if i > 0 { prev[j] } else { f64::INFINITY };
                let left = if j > 0 { curr[j - 1] } else { f64::INFINITY };
                let diag = if i > 0 && j > 0 {
                    prev[j - 1]
                } else {
                    f64::INFINITY
                };

                curr[j] = c + above.min(left).min(diag);
            }
            std::mem::swap(&mut prev, &mut curr);
        }

        // After the final swap, `prev` holds the last completed row.
        prev[m - 1]
    }

    /// Full cost matrix DTW, returning the distance and warping path.
    ///
    /// Cell `(i, j)` maps to flat index `i * m + j`. Ties between predecessors
    /// prefer `(i-1, j)`, then `(i, j-1)`, and take the diagonal last.
    fn accumulate_full(&self, a: CurveView<'_>, b: CurveView<'_>) -> (f64, Vec<WarpingStep>) {
        let n = a.len();
        let m = b.len();

        let mut acm = vec![f64::INFINITY; n * m];
        let mut dirs = vec![FROM_DIAG; n * m];

        for i in 0..n {
            let pa = a.point(i);
            for j in 0..m {
                let c = self.cost.eval(pa, b.point(j));
                let idx = i * m + j;

                if i == 0 && j == 0 {
                    acm[idx] = c;
                    continue;
                }

                let above = if i > 0 { acm[idx - m] } else { f64::INFINITY };
                let left = if j > 0 { acm[idx - 1] } else { f64::INFINITY };
                let diag = if i > 0 && j > 0 {
                    acm[idx - m - 1]
                } else {
                    f64::INFINITY
                };

                let (min_val, dir) = if above <= left && above <= diag {
                    (above, FROM_ABOVE)
                } else if left <= diag {
                    (left, FROM_LEFT)
                } else {
                    (diag, FROM_DIAG)
                };

                acm[idx] = c + min_val;
                dirs[idx] = dir;
            }
        }

        // Traceback from (n-1, m-1) to (0, 0).
        let mut path = Vec::with_capacity(n + m - 1);
        let mut i = n - 1;
        let mut j = m - 1;

        loop {
            path.push(WarpingStep { a: i, b: j });
            if i == 0 && j == 0 {
                break;
            }
            match dirs[i * m + j] {
                FROM_ABOVE => i -= 1,
                FROM_LEFT => j -= 1,
                _ => {
                    i -= 1;
                    j -= 1;
                }
            }
        }

        path.reverse();

        (acm[n * m - 1], path)
    }
}

/// Dynamic time warping with Euclidean vertex cost.
///
/// Returns `NaN` when either curve is empty.
///
/// # Errors
///
/// Returns [`CurveError::DimensionMismatch`] if the curves live in different spaces.
pub fn dtw<'a, 'b>(
    p: impl Into<CurveView<'a>>,
    q: impl Into<CurveView<'b>>,
) -> Result<f64, CurveError> {
    Dtw::euclidean().distance(p.into(), q.into())
}

/// [`dtw`] together with the optimal warping path.
///
/// # Errors
///
/// Returns [`CurveError::DimensionMismatch`] if the curves live in different spaces.
pub fn dtw_owp<'a, 'b>(
    p: impl Into<CurveView<'a>>,
    q: impl Into<CurveView<'b>>,
) -> Result<(f64, WarpingPath), CurveError> {
    Dtw::euclidean().distance_and_path(p.into(), q.into())
}

/// Dynamic time warping with squared Euclidean vertex cost.
///
/// Returns `NaN` when either curve is empty.
///
/// # Errors
///
/// Returns [`CurveError::DimensionMismatch`] if the curves live in different spaces.
pub fn sdtw<'a, 'b>(
    p: impl Into<CurveView<'a>>,
    q: impl Into<CurveView<'b>>,
) -> Result<f64, CurveError> {
    Dtw::squared().distance(p.into(), q.into())
}

/// [`sdtw`] together with the optimal warping path.
///
/// # Errors
///
/// Returns [`CurveError::DimensionMismatch`] if the curves live in different spaces.
pub fn sdtw_owp<'a, 'b>(
    p: impl Into<CurveView<'a>>,
    q: impl Into<CurveView<'b>>,
) -> Result<(f64, WarpingPath), CurveError> {
    Dtw::squared().distance_and_path(p.into(), q.into())
}
