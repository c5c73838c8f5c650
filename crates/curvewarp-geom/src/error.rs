//! Error types for curve validation.

/// Errors raised while validating curve coordinates or pairing two curves.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CurveError {
    /// Returned when a curve is declared with zero spatial dimensions.
    #[error("curve dimension must be at least 1")]
    ZeroDimension,

    /// Returned when a flat coordinate buffer is not a whole number of points.
    #[error("{len} coordinates cannot be split into points of dimension {dim}")]
    RaggedCoordinates {
        /// Number of coordinates supplied.
        len: usize,
        /// Declared point dimension.
        dim: usize,
    },

    /// Returned when the rows of a nested point list differ in length.
    #[error("row {row} has {found} coordinates, expected {expected}")]
    RaggedRow {
        /// Index of the first offending row.
        row: usize,
        /// Dimension established by the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },

    /// Returned when a coordinate is NaN or infinite.
    #[error("curve contains non-finite coordinate at flat index {index}")]
    NonFiniteValue {
        /// Flat (row-major) position of the first non-finite coordinate.
        index: usize,
    },

    /// Returned when two curves compared with each other live in different spaces.
    #[error("curves have mismatched dimensions: {left} vs {right}")]
    DimensionMismatch {
        /// Dimension of the first curve.
        left: usize,
        /// Dimension of the second curve.
        right: usize,
    },
}
