//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while building regression test fixtures
#[derive(Debug, Error)]
pub enum TestError {
    /// Core library error while building a fixture
    #[error("core error: {0}")]
    Core(#[from] rainshed_core::Error),

    /// Fixture rows have inconsistent lengths
    #[error("ragged fixture: row {row} has {actual} values, expected {expected}")]
    RaggedFixture {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Fixture has no rows
    #[error("empty fixture")]
    EmptyFixture,
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
