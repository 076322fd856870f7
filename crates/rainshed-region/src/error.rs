//! Error types for rainshed-region

use thiserror::Error;

/// Errors that can occur during region processing operations
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] rainshed_core::Error),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// A seed is not a single connected component
    #[error("seed {index} is not connected: flood fill reached {reached} of {total} voxels")]
    DisconnectedSeed {
        index: usize,
        reached: usize,
        total: usize,
    },

    /// A seed overlaps a seed imposed before it
    #[error("seed {index} overlaps an earlier seed")]
    OverlappingSeeds { index: usize },

    /// A seed has voxels outside the field or the containing mask
    #[error("seed {index} lies partly outside the segmented region")]
    SeedOutOfBounds { index: usize },

    /// Two grids that must share an extent do not
    #[error("extent mismatch: expected {}x{}x{}, got {}x{}x{}", .expected.0, .expected.1, .expected.2, .actual.0, .actual.1, .actual.2)]
    ExtentMismatch {
        expected: (u32, u32, u32),
        actual: (u32, u32, u32),
    },

    /// An internal invariant of the segmentation was broken
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// Operation not supported
    #[error("not supported: {0}")]
    NotSupported(String),
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
