//! Integral Fréchet distance computation.

use curvewarp_geom::integrate::point_polyline;
use curvewarp_geom::{Curve, CurveView, DistanceMatrix, sanitize_all, sanitize_pair};
use tracing::{debug, instrument};

use crate::error::FrechetError;
use crate::path::{CouplingPath, CouplingPoint};
use crate::sample::SampledCurve;
use crate::sweep::{NoTrace, PathTrace, Reach, Trace, sweep};

/// How the accumulated integral is reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Normalization {
    /// The raw integral of squared distance along the optimal coupling.
    #[default]
    Integral,
    /// `sqrt(integral / (length(P) + length(Q)))`: the root mean square
    /// distance per unit of Manhattan path length.
    QuadraticAverage,
}

/// Immutable integral Fréchet configuration. Thread-safe and copyable.
///
/// `delta` is the maximum spacing of Steiner points inserted along every
/// edge. Smaller values give a tighter upper bound on the continuous optimum
/// at quadratic cost in the number of boundary points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegralFrechet {
    delta: f64,
    normalization: Normalization,
}

impl IntegralFrechet {
    /// Create a calculator with Steiner-point resolution `delta`.
    ///
    /// # Errors
    ///
    /// Returns [`FrechetError::InvalidResolution`] unless `delta` is positive
    /// and finite.
    pub fn new(delta: f64) -> Result<Self, FrechetError> {
        if !(delta.is_finite() && delta > 0.0) {
            return Err(FrechetError::InvalidResolution { delta });
        }
        Ok(Self {
            delta,
            normalization: Normalization::Integral,
        })
    }

    /// Report the quadratic average instead of the raw integral.
    #[must_use]
    pub fn averaged(self) -> Self {
        self.with_normalization(Normalization::QuadraticAverage)
    }

    /// Set the normalization.
    #[must_use]
    pub fn with_normalization(self, normalization: Normalization) -> Self {
        Self {
            normalization,
            ..self
        }
    }

    /// Return the Steiner-point resolution.
    #[must_use]
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Return the normalization.
    #[must_use]
    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    /// Compute the distance between two curves.
    ///
    /// Returns `NaN` when either curve is empty or both are single points.
    ///
    /// # Errors
    ///
    /// Returns [`FrechetError::Curve`] if the curves live in different spaces.
    #[instrument(skip(a, b), fields(n = a.len(), m = b.len()))]
    pub fn distance(&self, a: CurveView<'_>, b: CurveView<'_>) -> Result<f64, FrechetError> {
        sanitize_pair(a, b)?;
        if a.is_empty() || b.is_empty() {
            debug!("empty curve, distance undefined");
            return Ok(f64::NAN);
        }
        let reach = self.solve(a, b, &NoTrace);
        Ok(self.normalize(reach.cost, a, b))
    }

    /// Compute the distance and the optimal coupling path.
    ///
    /// Returns `(NaN, empty path)` when either curve is empty and
    /// `(NaN, [(0, 0)])` when both are single points.
    ///
    /// # Errors
    ///
    /// Returns [`FrechetError::Curve`] if the curves live in different spaces.
    #[instrument(skip(a, b), fields(n = a.len(), m = b.len()))]
    pub fn distance_and_path(
        &self,
        a: CurveView<'_>,
        b: CurveView<'_>,
    ) -> Result<(f64, CouplingPath), FrechetError> {
        sanitize_pair(a, b)?;
        if a.is_empty() || b.is_empty() {
            debug!("empty curve, distance undefined");
            return Ok((f64::NAN, CouplingPath::default()));
        }
        let trace = PathTrace::for_vertices(a.len(), b.len());
        let reach = self.solve(a, b, &trace);
        debug!(
            vertices = reach.path.len(),
            capacity = trace.capacity(),
            "coupling path reconstructed"
        );
        let dist = self.normalize(reach.cost, a, b);
        Ok((dist, CouplingPath::new(reach.path)))
    }

    /// Compute pairwise distances for a collection of curves.
    ///
    /// Returns a symmetric [`DistanceMatrix`] containing distances for all
    /// unique pairs. Computation is parallelized across pairs using rayon.
    ///
    /// # Errors
    ///
    /// Returns [`FrechetError::Curve`] if any curve differs in dimension from
    /// the first.
    #[instrument(skip(self, curves), fields(n = curves.len()))]
    pub fn pairwise(&self, curves: &[Curve]) -> Result<DistanceMatrix, FrechetError> {
        sanitize_all(curves)?;
        let views: Vec<CurveView<'_>> = curves.iter().map(Curve::as_view).collect();
        Ok(DistanceMatrix::par_from_fn(views.len(), |i, j| {
            let (a, b) = (views[i], views[j]);
            if a.is_empty() || b.is_empty() {
                f64::NAN
            } else {
                self.normalize(self.solve(a, b, &NoTrace).cost, a, b)
            }
        }))
    }

    /// Raw integral and path for two non-empty curves of equal dimension.
    fn solve<T: Trace>(&self, a: CurveView<'_>, b: CurveView<'_>, trace: &T) -> Reach<T::Path> {
        match (a.len(), b.len()) {
            (1, 1) => {
                debug!("both curves are single points, distance undefined");
                Reach {
                    cost: f64::NAN,
                    path: trace.origin(),
                }
            }
            (1, _) => {
                debug!("first curve is a single point, integrating along the second");
                Reach {
                    cost: point_polyline(a.point(0), b.as_slice(), b.dim()),
                    path: trace.straight(CouplingPoint::new(0.0, b.arc_length())),
                }
            }
            (_, 1) => {
                debug!("second curve is a single point, integrating along the first");
                Reach {
                    cost: point_polyline(b.point(0), a.as_slice(), a.dim()),
                    path: trace.straight(CouplingPoint::new(a.arc_length(), 0.0)),
                }
            }
            (n, m) => {
                let p = SampledCurve::for_pair(a, m, self.delta);
                let q = SampledCurve::for_pair(b, n, self.delta);
                debug!(
                    points_p = p.n_points(),
                    points_q = q.n_points(),
                    cells = (n - 1) * (m - 1),
                    "sweeping free-space grid"
                );
                sweep(&p, &q, trace).unwrap_or_else(|| Reach {
                    cost: f64::NAN,
                    path: trace.origin(),
                })
            }
        }
    }

    fn normalize(&self, integral: f64, a: CurveView<'_>, b: CurveView<'_>) -> f64 {
        match self.normalization {
            Normalization::Integral => integral,
            Normalization::QuadraticAverage => {
                let total = a.arc_length() + b.arc_length();
                if total > 0.0 {
                    (integral.max(0.0) / total).sqrt()
                } else {
                    f64::NAN
                }
            }
        }
    }
}

/// Integral Fréchet distance: the minimum over monotone couplings of the
/// squared Euclidean distance integrated along the coupling, with Steiner
/// points spaced at most `delta` apart.
///
/// Returns `NaN` when either curve is empty or both are single points.
///
/// # Errors
///
/// Returns [`FrechetError::InvalidResolution`] for a non-positive or
/// non-finite `delta` and [`FrechetError::Curve`] if the curves live in
/// different spaces.
pub fn ifd<'a, 'b>(
    p: impl Into<CurveView<'a>>,
    q: impl Into<CurveView<'b>>,
    delta: f64,
) -> Result<f64, FrechetError> {
    IntegralFrechet::new(delta)?.distance(p.into(), q.into())
}

/// [`ifd`] together with the optimal coupling path.
///
/// # Errors
///
/// Same conditions as [`ifd`].
pub fn ifd_owp<'a, 'b>(
    p: impl Into<CurveView<'a>>,
    q: impl Into<CurveView<'b>>,
    delta: f64,
) -> Result<(f64, CouplingPath), FrechetError> {
    IntegralFrechet::new(delta)?.distance_and_path(p.into(), q.into())
}

/// Quadratic average Fréchet distance: `sqrt(ifd / (length(P) + length(Q)))`.
///
/// Returns `NaN` when either curve is empty, both are single points, or the
/// curves have zero combined length.
///
/// # Errors
///
/// Same conditions as [`ifd`].
pub fn qafd<'a, 'b>(
    p: impl Into<CurveView<'a>>,
    q: impl Into<CurveView<'b>>,
    delta: f64,
) -> Result<f64, FrechetError> {
    IntegralFrechet::new(delta)?
        .averaged()
        .distance(p.into(), q.into())
}

/// [`qafd`] together with the optimal coupling path.
///
/// # Errors
///
/// Same conditions as [`ifd`].
pub fn qafd_owp<'a, 'b>(
    p: impl Into<CurveView<'a>>,
    q: impl Into<CurveView<'b>>,
    delta: f64,
) -> Result<(f64, CouplingPath), FrechetError> {
    IntegralFrechet::new(delta)?
        .averaged()
        .distance_and_path(p.into(), q.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use curvewarp_geom::CurveError;

    fn curve(points: &[[f64; 2]]) -> Curve {
        Curve::try_from(points).unwrap()
    }

    #[test]
    fn rejects_bad_resolution() {
        for delta in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = IntegralFrechet::new(delta).unwrap_err();
            assert!(matches!(err, FrechetError::InvalidResolution { .. }));
        }
        let c = curve(&[[0.0, 0.0], [1.0, 0.0]]);
        assert!(ifd(&c, &c, 0.0).is_err());
    }

    #[test]
    fn builder_switches_normalization() {
        let calc = IntegralFrechet::new(0.5).unwrap();
        assert_eq!(calc.normalization(), Normalization::Integral);
        assert_eq!(calc.averaged().normalization(), Normalization::QuadraticAverage);
        assert_eq!(calc.averaged().delta(), 0.5);
    }

    #[test]
    fn parallel_segments_integrate_unit_offset() {
        let p = curve(&[[0.0, 0.0], [0.5, 0.0], [1.0, 0.0]]);
        let q = curve(&[[0.0, 1.0], [1.0, 1.0]]);
        let (d, path) = ifd_owp(&p, &q, 0.1).unwrap();
        assert!((d - 2.0).abs() < 1e-12, "{d}");
        assert_eq!(path.to_pairs(), vec![(0.0, 0.0), (0.5, 0.5), (1.0, 1.0)]);
        assert!((qafd(&p, &q, 0.1).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn identical_curves_distance_zero() {
        let c = curve(&[[0.0, 0.0], [1.0, 2.0], [3.0, 1.0], [4.0, 4.0]]);
        assert!(ifd(&c, &c, 0.25).unwrap().abs() < 1e-9);
        assert!(qafd(&c, &c, 0.25).unwrap().abs() < 1e-4);
    }

    #[test]
    fn single_point_against_segment() {
        let a = curve(&[[0.0, 0.0]]);
        let b = curve(&[[1.0, 0.0], [2.0, 0.0]]);
        let (d, path) = ifd_owp(&a, &b, 0.1).unwrap();
        assert!((d - 7.0 / 3.0).abs() < 1e-12);
        assert_eq!(path.to_pairs(), vec![(0.0, 0.0), (0.0, 1.0)]);
        let (d, path) = ifd_owp(&b, &a, 0.1).unwrap();
        assert!((d - 7.0 / 3.0).abs() < 1e-12);
        assert_eq!(path.to_pairs(), vec![(0.0, 0.0), (1.0, 0.0)]);
    }

    #[test]
    fn two_single_points_are_undefined() {
        let a = curve(&[[0.0, 0.0]]);
        let b = curve(&[[0.0, 0.0]]);
        let (d, path) = ifd_owp(&a, &b, 0.1).unwrap();
        assert!(d.is_nan());
        assert_eq!(path.points(), &[CouplingPoint::ORIGIN]);
        assert!(qafd(&a, &b, 0.1).unwrap().is_nan());
    }

    #[test]
    fn empty_curve_is_nan_with_empty_path() {
        let a = Curve::empty(2).unwrap();
        let b = curve(&[[0.0, 0.0], [1.0, 1.0]]);
        assert!(ifd(&a, &b, 0.1).unwrap().is_nan());
        let (d, path) = qafd_owp(&b, &a, 0.1).unwrap();
        assert!(d.is_nan());
        assert!(path.is_empty());
    }

    #[test]
    fn zero_length_curves_average_is_undefined() {
        let a = curve(&[[1.0, 1.0]]);
        let b = curve(&[[2.0, 1.0], [2.0, 1.0]]);
        assert_eq!(ifd(&a, &b, 0.1).unwrap(), 0.0);
        assert!(qafd(&a, &b, 0.1).unwrap().is_nan());
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        let a = Curve::new(vec![0.0, 1.0], 1).unwrap();
        let b = curve(&[[0.0, 0.0]]);
        assert_eq!(
            ifd(&a, &b, 0.1),
            Err(FrechetError::Curve(CurveError::DimensionMismatch {
                left: 1,
                right: 2
            }))
        );
    }

    #[test]
    fn distance_matches_distance_and_path() {
        let a = curve(&[[1.0, 0.0], [3.0, 1.0], [5.0, 0.5], [2.0, 2.0]]);
        let b = curve(&[[2.0, 0.0], [4.0, 1.0], [1.0, 1.0]]);
        let calc = IntegralFrechet::new(0.2).unwrap();
        for calc in [calc, calc.averaged()] {
            let d = calc.distance(a.as_view(), b.as_view()).unwrap();
            let (dp, _) = calc.distance_and_path(a.as_view(), b.as_view()).unwrap();
            assert_eq!(d.to_bits(), dp.to_bits());
        }
    }

    #[test]
    fn qafd_is_normalized_ifd() {
        let a = curve(&[[0.0, 0.0], [1.0, 1.0], [2.0, 0.0]]);
        let b = curve(&[[0.0, 0.5], [2.0, 0.5]]);
        let i = ifd(&a, &b, 0.1).unwrap();
        let q = qafd(&a, &b, 0.1).unwrap();
        let total = a.as_view().arc_length() + b.as_view().arc_length();
        assert!((q - (i / total).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn pairwise_matches_individual() {
        let curves = vec![
            curve(&[[0.0, 0.0], [1.0, 0.0], [2.0, 1.0]]),
            curve(&[[0.0, 1.0], [2.0, 1.0]]),
            curve(&[[0.5, 0.5]]),
            curve(&[[0.0, 0.0], [0.0, 2.0], [2.0, 2.0]]),
        ];
        let calc = IntegralFrechet::new(0.25).unwrap();
        let dm = calc.pairwise(&curves).unwrap();
        assert_eq!(dm.len(), 4);
        for (i, j, d) in dm.iter() {
            let expected = calc.distance(curves[i].as_view(), curves[j].as_view()).unwrap();
            assert_eq!(d.to_bits(), expected.to_bits(), "pair ({i}, {j})");
        }
    }

    #[test]
    fn pairwise_rejects_mixed_dimensions() {
        let curves = vec![
            curve(&[[0.0, 0.0], [1.0, 0.0]]),
            Curve::new(vec![0.0, 1.0], 1).unwrap(),
        ];
        let calc = IntegralFrechet::new(0.25).unwrap();
        assert!(calc.pairwise(&curves).is_err());
    }
}
