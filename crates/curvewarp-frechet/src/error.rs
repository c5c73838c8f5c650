//! Error types for integral Fréchet configuration.

use curvewarp_geom::CurveError;

/// Errors from configuring or running an integral Fréchet computation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrechetError {
    /// Returned when the Steiner-point resolution is not a positive finite number.
    #[error("sampling resolution must be positive and finite, got {delta}")]
    InvalidResolution {
        /// The rejected resolution.
        delta: f64,
    },

    /// Wraps a curve validation error.
    #[error("invalid curve input: {0}")]
    Curve(#[from] CurveError),
}
