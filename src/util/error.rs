//! Error types for sigmatch.

use thiserror::Error;

/// Result alias for sigmatch operations.
pub type SigMatchResult<T> = std::result::Result<T, SigMatchError>;

/// Errors that can occur when extracting, comparing or ranking signatures.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SigMatchError {
    /// Two feature vectors of different lengths were compared.
    #[error("dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },
    /// The query feature vector has no components.
    #[error("query feature vector is empty")]
    EmptyFeatureVector,
    /// Width or height is zero, or the pixel count overflows.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is smaller than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Backing buffer does not cover the requested grid.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Requested region does not fit inside the grid.
    #[error(
        "roi out of bounds: ({x}, {y}) {width}x{height} in {grid_width}x{grid_height}"
    )]
    RoiOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        grid_width: usize,
        grid_height: usize,
    },
    /// The number of requested matches must be at least one.
    #[error("invalid k: {k} (must be >= 1)")]
    InvalidTopK { k: usize },
    /// A metric selector did not name a known metric.
    #[error("unknown metric: {name}")]
    UnknownMetric { name: String },
    /// A descriptor selector did not name a known descriptor.
    #[error("unknown descriptor: {name}")]
    UnknownDescriptor { name: String },
    /// Decoding an image file failed.
    #[cfg(feature = "image-io")]
    #[error("image io: {reason}")]
    ImageIo { reason: String },
}
