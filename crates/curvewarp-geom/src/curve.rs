//! Curve types with validation guarantees.
//!
//! A curve is an ordered sequence of points in a fixed `dim`-dimensional space,
//! stored row-major in one flat buffer. These constructors are the
//! sanitisation layer in front of every measure: once a [`Curve`] or
//! [`CurveView`] exists, its coordinates are finite and its shape is sound.
//! Empty curves are valid values; measures treat them as degenerate input.

use std::ops::Index;

use crate::error::CurveError;
use crate::metric::distance;

/// Owned, validated polyline. All coordinates are finite.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    dim: usize,
    coords: Vec<f64>,
}

impl Curve {
    /// Create a curve from a flat row-major coordinate buffer.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`CurveError::ZeroDimension`] | `dim` is zero |
    /// | [`CurveError::RaggedCoordinates`] | `coords.len()` is not a multiple of `dim` |
    /// | [`CurveError::NonFiniteValue`] | Any coordinate is NaN or infinite |
    pub fn new(coords: Vec<f64>, dim: usize) -> Result<Self, CurveError> {
        check_coords(&coords, dim)?;
        Ok(Self { dim, coords })
    }

    /// Create a curve from a list of rows, one row per point.
    ///
    /// The first row fixes the dimension. An empty row list carries no
    /// dimension and is rejected; use [`Curve::empty`] for empty curves.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`CurveError::ZeroDimension`] | `rows` is empty or the first row is empty |
    /// | [`CurveError::RaggedRow`] | A row differs in length from the first |
    /// | [`CurveError::NonFiniteValue`] | Any coordinate is NaN or infinite |
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, CurveError> {
        let dim = rows.first().map_or(0, |r| r.as_ref().len());
        if dim == 0 {
            return Err(CurveError::ZeroDimension);
        }
        let mut coords = Vec::with_capacity(rows.len() * dim);
        for (row, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != dim {
                return Err(CurveError::RaggedRow {
                    row,
                    expected: dim,
                    found: r.len(),
                });
            }
            coords.extend_from_slice(r);
        }
        Self::new(coords, dim)
    }

    /// Create a curve with no points in `dim`-dimensional space.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::ZeroDimension`] when `dim` is zero.
    pub fn empty(dim: usize) -> Result<Self, CurveError> {
        Self::new(Vec::new(), dim)
    }

    /// Borrow this curve as a zero-copy view.
    #[must_use]
    pub fn as_view(&self) -> CurveView<'_> {
        CurveView {
            dim: self.dim,
            coords: &self.coords,
        }
    }

    /// Return the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.coords.len() / self.dim
    }

    /// Return true if the curve has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Return the spatial dimension of every point.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Consume and return the flat coordinate buffer.
    #[must_use]
    pub fn into_inner(self) -> Vec<f64> {
        self.coords
    }
}

impl<const D: usize> TryFrom<&[[f64; D]]> for Curve {
    type Error = CurveError;

    fn try_from(points: &[[f64; D]]) -> Result<Self, Self::Error> {
        Self::new(points.iter().flatten().copied().collect(), D)
    }
}

impl TryFrom<Vec<Vec<f64>>> for Curve {
    type Error = CurveError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(&rows)
    }
}

/// Borrowed, validated view into a curve. Zero-copy reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveView<'a> {
    dim: usize,
    coords: &'a [f64],
}

impl<'a> CurveView<'a> {
    /// Create a view over a flat row-major coordinate slice, validating it.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Curve::new`].
    pub fn new(coords: &'a [f64], dim: usize) -> Result<Self, CurveError> {
        check_coords(coords, dim)?;
        Ok(Self { dim, coords })
    }

    /// Return the flat coordinate slice.
    #[must_use]
    pub fn as_slice(&self) -> &'a [f64] {
        self.coords
    }

    /// Return the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.coords.len() / self.dim
    }

    /// Return true if the view has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Return the spatial dimension of every point.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Return point `i` as a coordinate slice.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    #[must_use]
    pub fn point(&self, i: usize) -> &'a [f64] {
        &self.coords[i * self.dim..(i + 1) * self.dim]
    }

    /// Iterate over the points in order.
    pub fn points(self) -> impl ExactSizeIterator<Item = &'a [f64]> {
        self.coords.chunks_exact(self.dim)
    }

    /// Return the Euclidean length of every edge, in order.
    #[must_use]
    pub fn edge_lengths(&self) -> Vec<f64> {
        let coords = self.coords;
        let dim = self.dim;
        coords
            .chunks_exact(dim)
            .zip(coords.chunks_exact(dim).skip(1))
            .map(|(a, b)| distance(a, b))
            .collect()
    }

    /// Return the total arclength of the polyline. Zero for fewer than two points.
    #[must_use]
    pub fn arc_length(&self) -> f64 {
        self.edge_lengths().iter().sum()
    }
}

impl<'a> From<&'a Curve> for CurveView<'a> {
    fn from(curve: &'a Curve) -> Self {
        curve.as_view()
    }
}

impl Index<usize> for CurveView<'_> {
    type Output = [f64];

    fn index(&self, index: usize) -> &Self::Output {
        self.point(index)
    }
}

impl AsRef<[f64]> for CurveView<'_> {
    fn as_ref(&self) -> &[f64] {
        self.coords
    }
}

/// Check that two curves can be compared with each other.
///
/// This is the pair-level half of input sanitisation; individual curves are
/// already validated by their constructors.
///
/// # Errors
///
/// Returns [`CurveError::DimensionMismatch`] when the dimensions differ.
pub fn sanitize_pair(p: CurveView<'_>, q: CurveView<'_>) -> Result<(), CurveError> {
    if p.dim() != q.dim() {
        return Err(CurveError::DimensionMismatch {
            left: p.dim(),
            right: q.dim(),
        });
    }
    Ok(())
}

/// Check that every curve in a collection shares the dimension of the first.
///
/// # Errors
///
/// Returns [`CurveError::DimensionMismatch`] for the first curve that differs.
pub fn sanitize_all(curves: &[Curve]) -> Result<(), CurveError> {
    if let Some(first) = curves.first() {
        for c in &curves[1..] {
            sanitize_pair(first.as_view(), c.as_view())?;
        }
    }
    Ok(())
}

fn check_coords(coords: &[f64], dim: usize) -> Result<(), CurveError> {
    if dim == 0 {
        return Err(CurveError::ZeroDimension);
    }
    if coords.len() % dim != 0 {
        return Err(CurveError::RaggedCoordinates {
            len: coords.len(),
            dim,
        });
    }
    if let Some(index) = coords.iter().position(|v| !v.is_finite()) {
        return Err(CurveError::NonFiniteValue { index });
    }
    Ok(())
}
