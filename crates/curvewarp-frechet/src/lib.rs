//! Integral Fréchet distances between n-dimensional polylines.
//!
//! Pure math library — zero I/O. Couples two curves by a monotone path in
//! their free-space diagram and integrates the squared Euclidean distance
//! along it. The optimum is taken over paths through Steiner points placed at
//! most `delta` apart on every edge, with each cell of the diagram solved in
//! closed form. Provides the raw integral (`ifd`), its length-normalised
//! quadratic average (`qafd`), optimal coupling paths, and parallel pairwise
//! distance matrices.

mod cell;
mod error;
mod frechet;
mod path;
mod sample;
mod sweep;

pub use error::FrechetError;
pub use frechet::{IntegralFrechet, Normalization, ifd, ifd_owp, qafd, qafd_owp};
pub use path::{CouplingPath, CouplingPoint};
