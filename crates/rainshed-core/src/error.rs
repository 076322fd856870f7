//! Error types for rainshed-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// rainshed-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid grid dimensions
    #[error("invalid dimensions: {x}x{y}x{z}")]
    InvalidDimension { x: u32, y: u32, z: u32 },

    /// Point lies outside a grid or mask
    #[error("point ({x}, {y}, {z}) is outside the extent")]
    PointOutOfBounds { x: i32, y: i32, z: i32 },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Empty input
    #[error("empty input: {0}")]
    EmptyInput(&'static str),
}

/// Result type alias for rainshed-core operations
pub type Result<T> = std::result::Result<T, Error>;
