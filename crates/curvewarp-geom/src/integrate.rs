//! Closed-form integrals of squared Euclidean distance along moving points.
//!
//! Every continuous measure in curvewarp reduces to integrating
//! `‖w(t)‖²` where `w` moves linearly from `w0` to `w1` over `t ∈ [0, 1]`.
//! The antiderivative only depends on the three Gram entries `w0·w0`,
//! `w0·w1` and `w1·w1`:
//!
//! ```text
//! ∫₀¹ ‖w0 + (w1 − w0)t‖² dt = (w0·w0 + w0·w1 + w1·w1) / 3
//! ```
//!
//! The integral is then scaled by the arclength travelled, which keeps the
//! Euclidean arclength parametrisation of both curves under the Manhattan
//! (L1) convention used for warping paths.

use crate::metric::{diff_dot, distance};

/// Segments shorter than this integrate to zero.
pub const SEGMENT_EPS: f64 = f64::EPSILON;

/// Mean of `‖w(t)‖²` over `t ∈ [0, 1]` for `w` linear between `w0` and `w1`.
///
/// Arguments are the Gram entries `w0·w0`, `w0·w1`, `w1·w1`. Rounding can push
/// the sum slightly below zero for near-coincident points; the result is
/// clamped at zero.
#[must_use]
#[inline]
pub fn quadratic_mean(w00: f64, w01: f64, w11: f64) -> f64 {
    ((w00 + w01 + w11) / 3.0).max(0.0)
}

/// Integral of the squared distance from fixed point `p` to a point moving
/// along the segment `a → b`, scaled by `‖b − a‖`.
#[must_use]
pub fn point_segment(p: &[f64], a: &[f64], b: &[f64]) -> f64 {
    let len = distance(a, b);
    if len < SEGMENT_EPS {
        return 0.0;
    }
    let w00 = diff_dot(a, p, a, p);
    let w01 = diff_dot(a, p, b, p);
    let w11 = diff_dot(b, p, b, p);
    len * quadratic_mean(w00, w01, w11)
}

/// Integral of the squared distance between two points moving simultaneously
/// along `a1 → b1` and `a2 → b2`, scaled by `‖b1 − a1‖ + ‖b2 − a2‖`.
#[must_use]
pub fn segment_segment(a1: &[f64], b1: &[f64], a2: &[f64], b2: &[f64]) -> f64 {
    let len = distance(a1, b1) + distance(a2, b2);
    if len < SEGMENT_EPS {
        return 0.0;
    }
    let w00 = diff_dot(a1, a2, a1, a2);
    let w01 = diff_dot(a1, a2, b1, b2);
    let w11 = diff_dot(b1, b2, b1, b2);
    len * quadratic_mean(w00, w01, w11)
}

/// Integral of the squared distance from `p` to every point of a polyline,
/// taken along the polyline's arclength.
///
/// `points` is a flat row-major buffer of `dim`-dimensional vertices.
#[must_use]
pub fn point_polyline(p: &[f64], points: &[f64], dim: usize) -> f64 {
    points
        .chunks_exact(dim)
        .zip(points.chunks_exact(dim).skip(1))
        .map(|(a, b)| point_segment(p, a, b))
        .sum()
}
