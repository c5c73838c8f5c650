//! Optimal coupling inside one cell of the free-space diagram.
//!
//! A cell pairs edge `P₀→P₁` of the first curve with edge `Q₀→Q₁` of the
//! second, both parametrised by arclength, so the cell is the rectangle
//! `[0, L1] × [0, L2]`. Inside it the separation vector is affine:
//!
//! ```text
//! w(x, y) = a + u·x − v·y,    a = P₀ − Q₀,  u, v unit edge directions
//! ```
//!
//! In the rotated coordinates `p = (x + y)/2`, `q = (x − y)/2` the squared
//! distance splits into `G(p) + H(q)` (the `p·q` term is `2(‖u‖² − ‖v‖²)pq`,
//! zero for unit directions), and a monotone path has Manhattan length
//! `2·dp`. The `G` part is therefore the same for every path between two
//! fixed points, and the optimal path minimises the time spent away from the
//! minimiser of `H`: the diagonal `y = x + b` with
//! `b = 2·a·(u+v) / ‖u+v‖²`. It moves axis-parallel onto that diagonal, runs
//! along it, and leaves axis-parallel toward the target. When the target is
//! reached before the diagonal could be, the path bends at a single corner.
//!
//! All costs are evaluated from six Gram scalars, so the solver never
//! touches the ambient dimension after construction.

use curvewarp_geom::integrate::{SEGMENT_EPS, quadratic_mean};
use curvewarp_geom::metric::{diff_dot, distance};

use crate::path::CouplingPoint;

/// Below this `‖u+v‖²` the edges are treated as antiparallel: the integrand is
/// constant along anti-diagonals and every monotone path costs the same.
pub(crate) const CELL_EPS: f64 = f64::EPSILON;

/// Position of a point relative to the extremal diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Below,
    On,
    Above,
}

/// Closed-form geometry of one free-space cell.
#[derive(Debug, Clone)]
pub(crate) struct Cell {
    width: f64,
    height: f64,
    aa: f64,
    au: f64,
    av: f64,
    uu: f64,
    uv: f64,
    vv: f64,
    /// Intercept `b` of the extremal diagonal `y = x + b`, if it exists.
    valley: Option<f64>,
}

impl Cell {
    pub(crate) fn new(p0: &[f64], p1: &[f64], q0: &[f64], q1: &[f64]) -> Self {
        let width = distance(p0, p1);
        let height = distance(q0, q1);
        let su = if width < SEGMENT_EPS { 0.0 } else { width.recip() };
        let sv = if height < SEGMENT_EPS { 0.0 } else { height.recip() };

        let aa = diff_dot(p0, q0, p0, q0);
        let au = diff_dot(p0, q0, p1, p0) * su;
        let av = diff_dot(p0, q0, q1, q0) * sv;
        let uu = diff_dot(p1, p0, p1, p0) * su * su;
        let uv = diff_dot(p1, p0, q1, q0) * su * sv;
        let vv = diff_dot(q1, q0, q1, q0) * sv * sv;

        let norm = uu + 2.0 * uv + vv;
        let valley = (norm >= CELL_EPS).then(|| 2.0 * (au + av) / norm);

        Self {
            width,
            height,
            aa,
            au,
            av,
            uu,
            uv,
            vv,
            valley,
        }
    }

    pub(crate) fn width(&self) -> f64 {
        self.width
    }

    pub(crate) fn height(&self) -> f64 {
        self.height
    }

    /// `w(s) · w(t)` for two local parameter points.
    fn gram(&self, s: CouplingPoint, t: CouplingPoint) -> f64 {
        self.aa + self.au * (s.a + t.a) - self.av * (s.b + t.b) + self.uu * s.a * t.a
            - self.uv * (s.a * t.b + t.a * s.b)
            + self.vv * s.b * t.b
    }

    /// Cost of the straight leg `s → t`: squared distance integrated over
    /// the Manhattan length of the leg.
    pub(crate) fn leg_cost(&self, s: CouplingPoint, t: CouplingPoint) -> f64 {
        let len = (t.a - s.a) + (t.b - s.b);
        if len <= 0.0 {
            return 0.0;
        }
        len * quadratic_mean(self.gram(s, s), self.gram(s, t), self.gram(t, t))
    }

    fn side(p: CouplingPoint, b: f64) -> Side {
        let diag = p.a + b;
        if p.b < diag {
            Side::Below
        } else if p.b > diag {
            Side::Above
        } else {
            Side::On
        }
    }

    /// Minimal-cost monotone path from `s` to `t`, both in local coordinates
    /// with `s ≤ t` componentwise.
    pub(crate) fn optimal_path(&self, s: CouplingPoint, t: CouplingPoint) -> CellPath {
        debug_assert!(s.a <= t.a && s.b <= t.b, "cell path must be monotone");
        let mut path = CellPath::start(s);

        let Some(b) = self.valley else {
            path.push(t);
            return path.priced(self);
        };

        let s_side = Self::side(s, b);
        let t_side = Self::side(t, b);

        // Axis-parallel approach from `s` onto the diagonal, and departure
        // from the diagonal toward `t`, clamped against rounding.
        let entry = match s_side {
            Side::Below => CouplingPoint::new(s.a, (s.a + b).max(s.b)),
            Side::Above => CouplingPoint::new((s.b - b).max(s.a), s.b),
            Side::On => s,
        };
        let exit = match t_side {
            Side::Below => CouplingPoint::new((t.b - b).min(t.a), t.b),
            Side::Above => CouplingPoint::new(t.a, (t.a + b).min(t.b)),
            Side::On => t,
        };

        if entry.a <= exit.a && entry.b <= exit.b {
            path.push(entry);
            path.push(exit);
        } else if s_side == Side::Above {
            // Both ends above the diagonal: run right first.
            path.push(CouplingPoint::new(t.a, s.b));
        } else {
            // Both ends below the diagonal: run up first.
            path.push(CouplingPoint::new(s.a, t.b));
        }
        path.push(t);
        path.priced(self)
    }
}

/// A polyline of at most four vertices inside one cell, with its cost.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CellPath {
    cost: f64,
    vertices: [CouplingPoint; 4],
    len: usize,
}

impl CellPath {
    fn start(s: CouplingPoint) -> Self {
        Self {
            cost: 0.0,
            vertices: [s; 4],
            len: 1,
        }
    }

    /// Append `v`, dropping zero-length legs.
    fn push(&mut self, v: CouplingPoint) {
        if self.vertices[self.len - 1] != v {
            self.vertices[self.len] = v;
            self.len += 1;
        }
    }

    fn priced(mut self, cell: &Cell) -> Self {
        self.cost = self
            .vertices()
            .windows(2)
            .map(|leg| cell.leg_cost(leg[0], leg[1]))
            .sum();
        self
    }

    pub(crate) fn cost(&self) -> f64 {
        self.cost
    }

    /// Vertices in order, starting with the source point.
    pub(crate) fn vertices(&self) -> &[CouplingPoint] {
        &self.vertices[..self.len]
    }
}
