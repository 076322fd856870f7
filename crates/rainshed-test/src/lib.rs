//! rainshed-test - Regression test framework for rainshed
//!
//! This crate provides a small regression test framework supporting two
//! modes:
//!
//! - **Compare**: Record every mismatch and fail the test (default)
//! - **Display**: Run and report without failing (inspection)
//!
//! It also provides fixture builders for the synthetic voxel fields the
//! regression tests segment.
//!
//! # Usage
//!
//! ```ignore
//! use rainshed_test::RegParams;
//!
//! let mut rp = RegParams::new("watershed");
//! rp.compare_values(2.0, objects.len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use rainshed_core::{Extent, Sample, VoxelBuffer};

/// Build a single-slice field from rows of samples
///
/// `rows[y][x]` becomes the voxel at `(x, y, 0)`.
///
/// # Errors
///
/// Returns an error if there are no rows or the rows differ in length.
pub fn field_2d<T: Sample>(rows: &[&[T]]) -> TestResult<VoxelBuffer<T>> {
    field_3d(&[rows])
}

/// Build a field from slices of rows
///
/// `slices[z][y][x]` becomes the voxel at `(x, y, z)`.
///
/// # Errors
///
/// Returns an error if the input is empty or ragged.
pub fn field_3d<T: Sample>(slices: &[&[&[T]]]) -> TestResult<VoxelBuffer<T>> {
    let height = slices.first().map(|s| s.len()).unwrap_or(0);
    let width = slices
        .first()
        .and_then(|s| s.first())
        .map(|r| r.len())
        .unwrap_or(0);
    if width == 0 || height == 0 {
        return Err(TestError::EmptyFixture);
    }

    let mut data = Vec::with_capacity(width * height * slices.len());
    for (z, slice) in slices.iter().enumerate() {
        if slice.len() != height {
            return Err(TestError::RaggedFixture {
                row: z * height,
                expected: height,
                actual: slice.len(),
            });
        }
        for (y, row) in slice.iter().enumerate() {
            if row.len() != width {
                return Err(TestError::RaggedFixture {
                    row: z * height + y,
                    expected: width,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
    }

    let extent = Extent::new(width as u32, height as u32, slices.len() as u32)?;
    Ok(VoxelBuffer::from_data(extent, data)?)
}

/// Build a reproducible pseudo-random field with values in `0..levels`
///
/// Uses a linear congruential generator so the same seed always yields the
/// same field. Few levels produce many plateaus.
///
/// # Errors
///
/// Never fails for a valid extent; the `Result` mirrors the other builders.
pub fn random_field(extent: Extent, seed: u32, levels: u8) -> TestResult<VoxelBuffer<u8>> {
    let mut state = seed;
    let levels = levels.max(1) as u32;
    let data = (0..extent.volume())
        .map(|_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            ((state >> 16) % levels) as u8
        })
        .collect();
    Ok(VoxelBuffer::from_data(extent, data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rainshed_core::Point3i;

    #[test]
    fn test_field_2d() {
        let field = field_2d::<u8>(&[&[1, 2, 3], &[4, 5, 6]]).unwrap();
        assert_eq!(field.extent().dimensions(), (3, 2, 1));
        assert_eq!(field.get(Point3i::new(2, 1, 0)).unwrap(), 6);
        assert!(field_2d::<u8>(&[&[1, 2], &[3]]).is_err());
        assert!(field_2d::<u8>(&[]).is_err());
    }

    #[test]
    fn test_random_field_is_reproducible() {
        let e = Extent::new(8, 8, 2).unwrap();
        let a = random_field(e, 7, 3).unwrap();
        let b = random_field(e, 7, 3).unwrap();
        assert_eq!(a, b);
        assert!(a.data().iter().all(|&v| v < 3));
    }
}
