//! VoxelBuffer - Dense 3D voxel grid
//!
//! `VoxelBuffer<T>` is a 3D array of scalar samples stored slice by slice.
//! It holds intensity fields handed to the segmentation engine as well as
//! integer label fields produced by it.
//!
//! # Examples
//!
//! ```
//! use rainshed_core::{Extent, Point3i, VoxelBuffer};
//!
//! // Create a 10x10x3 grid of 8-bit samples
//! let extent = Extent::new(10, 10, 3).unwrap();
//! let mut voxels = VoxelBuffer::<u8>::new(extent);
//!
//! // Set and get voxel values
//! voxels.set(Point3i::new(1, 2, 2), 42).unwrap();
//! assert_eq!(voxels.get(Point3i::new(1, 2, 2)).unwrap(), 42);
//!
//! // Access a whole slice
//! assert_eq!(voxels.slice(2).len(), 100);
//! ```

use std::fmt::Debug;

use crate::error::{Error, Result};
use crate::extent::Extent;
use crate::point::Point3i;

/// A scalar voxel sample type
///
/// Intensities only need to be copied and compared; the segmentation engine
/// never performs arithmetic on them.
pub trait Sample: Copy + PartialOrd + Debug + Default + Send + Sync + 'static {}

impl Sample for u8 {}
impl Sample for u16 {}
impl Sample for u32 {}
impl Sample for i32 {}
impl Sample for f32 {}
impl Sample for f64 {}

/// Dense 3D voxel grid
///
/// # Memory Layout
///
/// Data is stored slice-major with no padding. The voxel at (x, y, z) is at
/// index `(z * height + y) * width + x`, see [`Extent::index`].
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelBuffer<T> {
    extent: Extent,
    data: Vec<T>,
}

impl<T: Sample> VoxelBuffer<T> {
    /// Create a new buffer with every voxel set to `T::default()`
    pub fn new(extent: Extent) -> Self {
        Self::new_with_value(extent, T::default())
    }

    /// Create a new buffer with every voxel set to `value`
    pub fn new_with_value(extent: Extent, value: T) -> Self {
        Self {
            extent,
            data: vec![value; extent.volume()],
        }
    }

    /// Create a buffer from raw slice-major data
    ///
    /// # Errors
    ///
    /// Returns an error if the data length doesn't match the extent.
    pub fn from_data(extent: Extent, data: Vec<T>) -> Result<Self> {
        if data.len() != extent.volume() {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{}x{} = {}",
                data.len(),
                extent.x(),
                extent.y(),
                extent.z(),
                extent.volume()
            )));
        }
        Ok(Self { extent, data })
    }

    /// Create a buffer by stacking equally-sized 2D slices
    ///
    /// Each slice is given in row-major order.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no slices or any slice has the wrong
    /// length.
    pub fn from_slices(width: u32, height: u32, slices: &[Vec<T>]) -> Result<Self> {
        if slices.is_empty() {
            return Err(Error::EmptyInput("no slices"));
        }
        let extent = Extent::new(width, height, slices.len() as u32)?;
        let mut data = Vec::with_capacity(extent.volume());
        for (z, slice) in slices.iter().enumerate() {
            if slice.len() != extent.volume_xy() {
                return Err(Error::InvalidParameter(format!(
                    "slice {} has {} voxels, expected {}",
                    z,
                    slice.len(),
                    extent.volume_xy()
                )));
            }
            data.extend_from_slice(slice);
        }
        Ok(Self { extent, data })
    }

    /// Get the grid extent
    #[inline]
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Get the voxel value at a point
    ///
    /// # Errors
    ///
    /// Returns `Error::PointOutOfBounds` if the point is outside the grid.
    #[inline]
    pub fn get(&self, p: Point3i) -> Result<T> {
        if !self.extent.contains(p) {
            return Err(Error::PointOutOfBounds {
                x: p.x,
                y: p.y,
                z: p.z,
            });
        }
        Ok(self.data[self.extent.index(p)])
    }

    /// Set the voxel value at a point
    ///
    /// # Errors
    ///
    /// Returns `Error::PointOutOfBounds` if the point is outside the grid.
    #[inline]
    pub fn set(&mut self, p: Point3i, value: T) -> Result<()> {
        if !self.extent.contains(p) {
            return Err(Error::PointOutOfBounds {
                x: p.x,
                y: p.y,
                z: p.z,
            });
        }
        let idx = self.extent.index(p);
        self.data[idx] = value;
        Ok(())
    }

    /// Get the voxel value at a raster offset
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[inline]
    pub fn value(&self, index: usize) -> T {
        self.data[index]
    }

    /// Set the voxel value at a raster offset
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[inline]
    pub fn set_value(&mut self, index: usize, value: T) {
        self.data[index] = value;
    }

    /// Get a single slice as a row-major 2D array
    ///
    /// # Panics
    ///
    /// Panics if `z` is out of range.
    pub fn slice(&self, z: u32) -> &[T] {
        let xy = self.extent.volume_xy();
        let start = z as usize * xy;
        &self.data[start..start + xy]
    }

    /// Get a single slice mutably
    ///
    /// # Panics
    ///
    /// Panics if `z` is out of range.
    pub fn slice_mut(&mut self, z: u32) -> &mut [T] {
        let xy = self.extent.volume_xy();
        let start = z as usize * xy;
        &mut self.data[start..start + xy]
    }

    /// Get the raw data
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Get the raw data mutably
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Set every voxel to `value`
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Minimum and maximum sample values
    ///
    /// Incomparable samples (NaN) are skipped.
    pub fn min_max(&self) -> (T, T) {
        let mut min = self.data[0];
        let mut max = self.data[0];
        for &v in &self.data[1..] {
            if v < min {
                min = v;
            }
            if v > max {
                max = v;
            }
        }
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_access() {
        let e = Extent::new(3, 2, 2).unwrap();
        let mut v = VoxelBuffer::<u16>::new(e);
        assert!(v.data().iter().all(|&x| x == 0));

        v.set(Point3i::new(2, 1, 1), 7).unwrap();
        assert_eq!(v.get(Point3i::new(2, 1, 1)).unwrap(), 7);
        assert_eq!(v.value(e.index(Point3i::new(2, 1, 1))), 7);
        assert!(v.get(Point3i::new(3, 0, 0)).is_err());
        assert!(v.set(Point3i::new(0, 0, -1), 1).is_err());
    }

    #[test]
    fn test_from_data_length_checked() {
        let e = Extent::new(2, 2, 1).unwrap();
        assert!(VoxelBuffer::from_data(e, vec![1.0f32; 3]).is_err());
        let v = VoxelBuffer::from_data(e, vec![1.0f32, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(v.get(Point3i::new(1, 1, 0)).unwrap(), 4.0);
    }

    #[test]
    fn test_from_slices() {
        let v = VoxelBuffer::from_slices(2, 1, &[vec![1u8, 2], vec![3, 4]]).unwrap();
        assert_eq!(v.extent().dimensions(), (2, 1, 2));
        assert_eq!(v.slice(1), &[3, 4]);
        assert!(VoxelBuffer::<u8>::from_slices(2, 1, &[vec![1u8]]).is_err());
        assert!(VoxelBuffer::<u8>::from_slices(2, 1, &[]).is_err());
    }

    #[test]
    fn test_slice_mut_and_min_max() {
        let e = Extent::new(2, 2, 2).unwrap();
        let mut v = VoxelBuffer::new_with_value(e, 5i32);
        v.slice_mut(1)[3] = -2;
        v.slice_mut(0)[0] = 9;
        assert_eq!(v.min_max(), (-2, 9));
        v.fill(1);
        assert_eq!(v.min_max(), (1, 1));
    }
}
