//! Curve primitives shared by the curvewarp measures.
//!
//! Pure math library — zero I/O. Provides validated n-dimensional polyline
//! types (the sanitisation layer every measure sits behind), closed-form
//! integrals of squared distance along moving segments, and a symmetric
//! pairwise distance matrix.

mod curve;
mod error;
pub mod integrate;
mod matrix;
pub mod metric;

pub use curve::{Curve, CurveView, sanitize_all, sanitize_pair};
pub use error::CurveError;
pub use matrix::DistanceMatrix;
