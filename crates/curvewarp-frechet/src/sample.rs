//! Steiner-point sampling of polyline edges.

use curvewarp_geom::CurveView;

/// A polyline with Steiner points inserted along every edge.
///
/// Edge `i` is split into `subedges(i)` pieces of equal arclength. The
/// flattened point list contains every original vertex; vertex `i` sits at
/// index `vertex_index(i)`. The last point is the last vertex, bit for bit.
#[derive(Debug, Clone)]
pub(crate) struct SampledCurve {
    dim: usize,
    points: Vec<f64>,
    edge_lengths: Vec<f64>,
    subedges: Vec<usize>,
    vertex_index: Vec<usize>,
    arclength: Vec<f64>,
}

impl SampledCurve {
    /// Sample `curve` for comparison against a curve with `other_len` vertices.
    ///
    /// When the other curve is a single segment its side of the free-space
    /// diagram is one cell wide, and extra Steiner points on this curve cannot
    /// improve the coupling, so every edge stays a single sub-edge.
    pub(crate) fn for_pair(curve: CurveView<'_>, other_len: usize, delta: f64) -> Self {
        if other_len == 2 {
            Self::unsampled(curve)
        } else {
            Self::new(curve, delta)
        }
    }

    /// Split every edge into `max(1, ceil(len / delta))` equal sub-edges.
    ///
    /// `curve` must have at least two vertices and `delta` must be positive.
    pub(crate) fn new(curve: CurveView<'_>, delta: f64) -> Self {
        debug_assert!(delta > 0.0, "sampling resolution must be positive");
        let edge_lengths = curve.edge_lengths();
        let subedges = edge_lengths
            .iter()
            .map(|&len| (len / delta).ceil().max(1.0) as usize)
            .collect();
        Self::build(curve, edge_lengths, subedges)
    }

    /// Keep the original vertices only, one sub-edge per edge.
    pub(crate) fn unsampled(curve: CurveView<'_>) -> Self {
        let edge_lengths = curve.edge_lengths();
        let subedges = vec![1; edge_lengths.len()];
        Self::build(curve, edge_lengths, subedges)
    }

    fn build(curve: CurveView<'_>, edge_lengths: Vec<f64>, subedges: Vec<usize>) -> Self {
        debug_assert!(curve.len() >= 2);
        let dim = curve.dim();
        let total: usize = subedges.iter().sum::<usize>() + 1;
        let mut points = Vec::with_capacity(total * dim);
        let mut vertex_index = Vec::with_capacity(curve.len());
        let mut arclength = Vec::with_capacity(curve.len());

        let mut offset = 0;
        let mut acc = 0.0;
        for (i, (&n, &len)) in subedges.iter().zip(&edge_lengths).enumerate() {
            let a = curve.point(i);
            let b = curve.point(i + 1);
            vertex_index.push(offset);
            arclength.push(acc);
            for k in 0..n {
                let t = fraction(k, n);
                points.extend(a.iter().zip(b).map(|(x, y)| x + (y - x) * t));
            }
            offset += n;
            acc += len;
        }
        points.extend_from_slice(curve.point(curve.len() - 1));
        vertex_index.push(offset);
        arclength.push(acc);

        Self {
            dim,
            points,
            edge_lengths,
            subedges,
            vertex_index,
            arclength,
        }
    }

    /// Number of original vertices.
    pub(crate) fn n_vertices(&self) -> usize {
        self.vertex_index.len()
    }

    /// Number of sampled points, original vertices included.
    pub(crate) fn n_points(&self) -> usize {
        self.points.len() / self.dim
    }

    /// Sampled point `k`.
    pub(crate) fn point(&self, k: usize) -> &[f64] {
        &self.points[k * self.dim..(k + 1) * self.dim]
    }

    /// Original vertex `i`.
    pub(crate) fn vertex(&self, i: usize) -> &[f64] {
        self.point(self.vertex_index[i])
    }

    /// Index of original vertex `i` in the sampled point list.
    pub(crate) fn vertex_index(&self, i: usize) -> usize {
        self.vertex_index[i]
    }

    pub(crate) fn subedges(&self, i: usize) -> usize {
        self.subedges[i]
    }

    /// Arclength from the first vertex to original vertex `i`.
    pub(crate) fn arclength(&self, i: usize) -> f64 {
        self.arclength[i]
    }

    /// Arclength of Steiner point `k` of edge `i`, measured from vertex `i`.
    pub(crate) fn local_param(&self, i: usize, k: usize) -> f64 {
        self.edge_lengths[i] * fraction(k, self.subedges[i])
    }

    /// Arclength of sampled point `k` from the first vertex.
    ///
    /// Agrees exactly with `arclength(i) + local_param(i, k')` for the edge
    /// the point lies on.
    pub(crate) fn param(&self, k: usize) -> f64 {
        let i = self.vertex_index.partition_point(|&v| v <= k) - 1;
        if i + 1 == self.n_vertices() {
            return self.arclength[i];
        }
        self.arclength[i] + self.local_param(i, k - self.vertex_index[i])
    }
}

#[inline]
fn fraction(k: usize, n: usize) -> f64 {
    k as f64 / n as f64
}
