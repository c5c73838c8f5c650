//! Dynamic program over the cell grid of the free-space diagram.
//!
//! Cells are the products of original edges, swept column by column
//! (`i` over the first curve, `j` over the second). Every cell reads the
//! optimal reach costs on its left and bottom boundaries at the Steiner
//! points and writes them on its right and top boundaries. A boundary target
//! is reached from the best of:
//!
//! 1. the bottom-left corner,
//! 2. left-boundary points at or below it,
//! 3. bottom-boundary points at or left of it,
//!
//! with the first strictly smaller candidate winning ties. Left sources are
//! skipped in the first column and bottom sources in the first row: there the
//! boundary lies on an axis, and the cell solver's path from the corner
//! already covers every path along it.
//!
//! The sweep is generic over a [`Trace`], so the cost-only and the
//! path-tracking variants share one recurrence.

use curvewarp_geom::integrate::point_segment;

use crate::cell::{Cell, CellPath};
use crate::path::CouplingPoint;
use crate::sample::SampledCurve;

/// What the sweep carries alongside each reach cost.
pub(crate) trait Trace {
    /// Path representation stored at every boundary point.
    type Path;

    /// The path consisting of the origin alone.
    fn origin(&self) -> Self::Path;

    /// The straight path from the origin to `end`.
    fn straight(&self, end: CouplingPoint) -> Self::Path;

    /// `pred` followed by the cell-local path `cell` shifted to `origin`.
    fn extend(&self, pred: &Self::Path, origin: CouplingPoint, cell: &CellPath) -> Self::Path;

    /// Copy a stored path for reuse at a second boundary point.
    fn duplicate(&self, path: &Self::Path) -> Self::Path;
}

/// Cost-only sweep.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct NoTrace;

impl Trace for NoTrace {
    type Path = ();

    fn origin(&self) {}

    fn straight(&self, _end: CouplingPoint) {}

    fn extend(&self, _pred: &(), _origin: CouplingPoint, _cell: &CellPath) {}

    fn duplicate(&self, _path: &()) {}
}

/// Path-tracking sweep. Every stored path is a fresh buffer of `capacity`
/// vertices, enough for any monotone path through the grid.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PathTrace {
    capacity: usize,
}

impl PathTrace {
    /// Tracer for curves with `np` and `nq` original vertices.
    pub(crate) fn for_vertices(np: usize, nq: usize) -> Self {
        // A monotone path crosses at most np + nq - 3 cells with up to four
        // vertices each, and consecutive cells share one vertex.
        let cells = (np + nq).saturating_sub(3).max(1);
        Self {
            capacity: cells * 4 - cells.saturating_sub(1),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    fn buffer(&self) -> Vec<CouplingPoint> {
        Vec::with_capacity(self.capacity)
    }
}

impl Trace for PathTrace {
    type Path = Vec<CouplingPoint>;

    fn origin(&self) -> Self::Path {
        let mut path = self.buffer();
        path.push(CouplingPoint::ORIGIN);
        path
    }

    fn straight(&self, end: CouplingPoint) -> Self::Path {
        let mut path = self.origin();
        if end != CouplingPoint::ORIGIN {
            path.push(end);
        }
        path
    }

    fn extend(&self, pred: &Self::Path, origin: CouplingPoint, cell: &CellPath) -> Self::Path {
        let mut path = self.buffer();
        path.extend_from_slice(pred);
        for v in &cell.vertices()[1..] {
            push_vertex(&mut path, v.offset(origin));
        }
        path
    }

    fn duplicate(&self, path: &Self::Path) -> Self::Path {
        let mut copy = self.buffer();
        copy.extend_from_slice(path);
        copy
    }
}

/// Coordinates closer than this are treated as equal when merging runs.
const MERGE_EPS: f64 = 1e-12;

fn same(x: f64, y: f64) -> bool {
    (x - y).abs() <= MERGE_EPS * x.abs().max(y.abs()).max(1.0)
}

/// Append `v` to a monotone path, dropping it if it repeats the last vertex
/// and replacing the last vertex if it only continues an axis-parallel run.
fn push_vertex(path: &mut Vec<CouplingPoint>, v: CouplingPoint) {
    let (repeat, continues) = match path.as_slice() {
        [.., u, w] => (
            same(w.a, v.a) && same(w.b, v.b),
            (same(u.a, w.a) && same(w.a, v.a)) || (same(u.b, w.b) && same(w.b, v.b)),
        ),
        [w] => (same(w.a, v.a) && same(w.b, v.b), false),
        [] => (false, false),
    };
    if repeat {
        return;
    }
    if continues {
        path.pop();
    }
    path.push(v);
}

/// Optimal cost of reaching a boundary point, with the path that achieves it.
#[derive(Debug, Clone)]
pub(crate) struct Reach<P> {
    pub(crate) cost: f64,
    pub(crate) path: P,
}

impl<P> Reach<P> {
    fn duplicate<T: Trace<Path = P>>(&self, trace: &T) -> Self {
        Self {
            cost: self.cost,
            path: trace.duplicate(&self.path),
        }
    }
}

/// Where a candidate predecessor lies on the cell boundary.
#[derive(Debug, Clone, Copy)]
enum Source {
    Left(usize),
    Bottom(usize),
}

/// Boundary data visible from one cell.
struct Frame<'s, P> {
    cell: Cell,
    /// Global coordinates of the bottom-left corner.
    origin: CouplingPoint,
    /// Left boundary, corner at index 0.
    left: &'s [Reach<P>],
    /// Bottom boundary without the corner: `bottom[k - 1]` is point `k`.
    bottom: &'s [Reach<P>],
    /// Local parameter of each left boundary point.
    left_at: Vec<f64>,
    /// Local parameter of each bottom boundary point, corner included.
    bottom_at: &'s [f64],
}

impl<P> Frame<'_, P> {
    fn source_point(&self, src: Source) -> CouplingPoint {
        match src {
            Source::Left(l) => CouplingPoint::new(0.0, self.left_at[l]),
            Source::Bottom(k) => CouplingPoint::new(self.bottom_at[k], 0.0),
        }
    }

    fn source_reach(&self, src: Source) -> &Reach<P> {
        match src {
            Source::Left(l) => &self.left[l],
            Source::Bottom(k) => &self.bottom[k - 1],
        }
    }

    /// Best reach of local point `target` from left sources `0..=l_max` and
    /// bottom sources `1..=k_max`.
    fn reach<T: Trace<Path = P>>(
        &self,
        trace: &T,
        target: CouplingPoint,
        l_max: usize,
        k_max: usize,
    ) -> Reach<P> {
        let corner = Source::Left(0);
        let local = self.cell.optimal_path(self.source_point(corner), target);
        let mut best = (self.source_reach(corner).cost + local.cost(), corner, local);

        let candidates = (1..=l_max)
            .map(Source::Left)
            .chain((1..=k_max).map(Source::Bottom));
        for src in candidates {
            let local = self.cell.optimal_path(self.source_point(src), target);
            let cost = self.source_reach(src).cost + local.cost();
            if cost < best.0 {
                best = (cost, src, local);
            }
        }

        let (cost, src, local) = best;
        Reach {
            cost,
            path: trace.extend(&self.source_reach(src).path, self.origin, &local),
        }
    }
}

/// Reach costs along the first column boundary `a = 0`: the first vertex of
/// `p` held fixed while `q` is traversed up to every sampled point.
fn axis_line<T: Trace>(p: &SampledCurve, q: &SampledCurve, trace: &T) -> Vec<Reach<T::Path>> {
    let anchor = p.vertex(0);
    let mut line = Vec::with_capacity(q.n_points());
    line.push(Reach {
        cost: 0.0,
        path: trace.origin(),
    });
    let mut cost = 0.0;
    for k in 1..q.n_points() {
        cost += point_segment(anchor, q.point(k - 1), q.point(k));
        line.push(Reach {
            cost,
            path: trace.straight(CouplingPoint::new(0.0, q.param(k))),
        });
    }
    line
}

/// Run the sweep and return the optimal reach of the far corner
/// `(length(p), length(q))`.
///
/// Both curves need at least two vertices; `None` otherwise.
pub(crate) fn sweep<T: Trace>(
    p: &SampledCurve,
    q: &SampledCurve,
    trace: &T,
) -> Option<Reach<T::Path>> {
    if p.n_vertices() < 2 || q.n_vertices() < 2 {
        return None;
    }
    let last_i = p.n_vertices() - 2;
    let last_j = q.n_vertices() - 2;

    let mut left = axis_line(p, q, trace);
    let mut floor = 0.0;

    for i in 0..=last_i {
        let np = p.subedges(i);
        let bottom_at: Vec<f64> = (0..=np).map(|k| p.local_param(i, k)).collect();

        // Bottom boundary `b = 0`: the first vertex of `q` held fixed.
        floor += point_segment(q.vertex(0), p.vertex(i), p.vertex(i + 1));
        let mut next_left = Vec::new();
        if i != last_i {
            next_left.reserve(q.n_points());
            next_left.push(Reach {
                cost: floor,
                path: trace.straight(CouplingPoint::new(p.arclength(i + 1), 0.0)),
            });
        }

        let mut bottom: Vec<Reach<T::Path>> = Vec::new();
        for j in 0..=last_j {
            let nq = q.subedges(j);
            let qa = q.vertex_index(j);

            let frame = Frame {
                cell: Cell::new(p.vertex(i), p.vertex(i + 1), q.vertex(j), q.vertex(j + 1)),
                origin: CouplingPoint::new(p.arclength(i), q.arclength(j)),
                left: &left[qa..=qa + nq],
                bottom: &bottom,
                left_at: (0..=nq).map(|l| q.local_param(j, l)).collect(),
                bottom_at: &bottom_at,
            };
            let left_sources = |l: usize| if i == 0 { 0 } else { l };
            let bottom_sources = |k: usize| if j == 0 { 0 } else { k };

            // Top boundary, skipping the corner it shares with the left one.
            // Only the far corner is read from the last row.
            let first_k = if j == last_j { np } else { 1 };
            let height = frame.cell.height();
            let mut top: Vec<Reach<T::Path>> = (first_k..=np)
                .map(|k| {
                    let target = CouplingPoint::new(bottom_at[k], height);
                    frame.reach(trace, target, left_sources(nq), bottom_sources(k))
                })
                .collect();

            // Right boundary below the far corner, unless this is the last column.
            if i != last_i {
                let width = frame.cell.width();
                for m in 1..nq {
                    let target = CouplingPoint::new(width, frame.left_at[m]);
                    next_left.push(frame.reach(trace, target, left_sources(m), bottom_sources(np)));
                }
            }

            if i != last_i {
                if let Some(far) = top.last() {
                    next_left.push(far.duplicate(trace));
                }
            } else if j == last_j {
                return top.pop();
            }
            bottom = top;
        }

        left = next_left;
    }
    None
}
