//! Dynamic time warping between n-dimensional polylines.
//!
//! Pure math library — zero I/O. Provides DTW with Euclidean (`dtw`) or
//! squared Euclidean (`sdtw`) vertex cost, optimal warping path extraction,
//! and parallel pairwise distance matrices.

mod cost;
mod dtw;
mod path;

pub use cost::PointCost;
pub use dtw::{Dtw, dtw, dtw_owp, sdtw, sdtw_owp};
pub use path::{WarpingPath, WarpingStep};
