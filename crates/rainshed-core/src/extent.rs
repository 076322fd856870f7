//! Extent - Size of a voxel grid
//!
//! An `Extent` describes the number of voxels along each axis and provides
//! the raster-order mapping between points and linear offsets.

use crate::error::{Error, Result};
use crate::point::Point3i;

/// Size of a 3D voxel grid.
///
/// A grid with `z == 1` is treated as a 2D image.
///
/// # Memory Layout
///
/// Voxels are addressed slice-major: the raster offset of `(x, y, z)` is
/// `(z * Y + y) * X + x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Extent {
    x: u32,
    y: u32,
    z: u32,
}

impl Extent {
    /// Create a new extent
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if any size is 0.
    pub fn new(x: u32, y: u32, z: u32) -> Result<Self> {
        if x == 0 || y == 0 || z == 0 {
            return Err(Error::InvalidDimension { x, y, z });
        }
        Ok(Self { x, y, z })
    }

    /// Size along X
    #[inline]
    pub fn x(&self) -> u32 {
        self.x
    }

    /// Size along Y
    #[inline]
    pub fn y(&self) -> u32 {
        self.y
    }

    /// Size along Z (number of slices)
    #[inline]
    pub fn z(&self) -> u32 {
        self.z
    }

    /// Dimensions as (x, y, z)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32, u32) {
        (self.x, self.y, self.z)
    }

    /// Number of voxels in a single slice
    #[inline]
    pub fn volume_xy(&self) -> usize {
        self.x as usize * self.y as usize
    }

    /// Total number of voxels
    #[inline]
    pub fn volume(&self) -> usize {
        self.volume_xy() * self.z as usize
    }

    /// Whether the grid has a single slice
    #[inline]
    pub fn is_2d(&self) -> bool {
        self.z == 1
    }

    /// Check if a point lies inside the grid
    #[inline]
    pub fn contains(&self, p: Point3i) -> bool {
        p.x >= 0
            && p.y >= 0
            && p.z >= 0
            && (p.x as u32) < self.x
            && (p.y as u32) < self.y
            && (p.z as u32) < self.z
    }

    /// Raster offset of a point
    ///
    /// The point must lie inside the grid; use [`Extent::contains`] first
    /// when that is not already known.
    #[inline]
    pub fn index(&self, p: Point3i) -> usize {
        (p.z as usize * self.y as usize + p.y as usize) * self.x as usize + p.x as usize
    }

    /// Point at a raster offset (inverse of [`Extent::index`])
    #[inline]
    pub fn point(&self, index: usize) -> Point3i {
        let xy = self.volume_xy();
        let z = index / xy;
        let rem = index % xy;
        let y = rem / self.x as usize;
        let x = rem % self.x as usize;
        Point3i::new(x as i32, y as i32, z as i32)
    }

    /// Iterate over every point in raster order
    pub fn points(&self) -> impl Iterator<Item = Point3i> + '_ {
        (0..self.volume()).map(|i| self.point(i))
    }
}
