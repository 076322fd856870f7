//! ObjectMask - Binary voxel membership within a bounding box
//!
//! An `ObjectMask` describes one object (a segmented region, a seed, or a
//! containing region of interest). Membership is stored only for the voxels
//! of its bounding box; all coordinates in the public API are global.

use crate::bbox::BoundingBox;
use crate::error::{Error, Result};
use crate::extent::Extent;
use crate::point::Point3i;
use crate::voxels::VoxelBuffer;

/// Value of a voxel that belongs to the object
pub const ON: u8 = 255;
/// Value of a voxel that does not belong to the object
pub const OFF: u8 = 0;

/// A binary mask positioned in voxel space
///
/// # Examples
///
/// ```
/// use rainshed_core::{ObjectMask, Point3i};
///
/// let mask = ObjectMask::from_points(&[
///     Point3i::new(2, 3, 0),
///     Point3i::new(3, 3, 0),
/// ]).unwrap();
/// assert_eq!(mask.num_voxels(), 2);
/// assert!(mask.contains(Point3i::new(3, 3, 0)));
/// assert!(!mask.contains(Point3i::new(0, 0, 0)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectMask {
    bbox: BoundingBox,
    voxels: VoxelBuffer<u8>,
}

impl ObjectMask {
    /// Create an empty mask covering `bbox`
    pub fn new(bbox: BoundingBox) -> Result<Self> {
        let extent = bbox.extent()?;
        Ok(Self {
            bbox,
            voxels: VoxelBuffer::new_with_value(extent, OFF),
        })
    }

    /// Create a mask with every voxel of `bbox` switched on
    pub fn new_filled(bbox: BoundingBox) -> Result<Self> {
        let extent = bbox.extent()?;
        Ok(Self {
            bbox,
            voxels: VoxelBuffer::new_with_value(extent, ON),
        })
    }

    /// Create a mask from a list of global points
    ///
    /// The bounding box is the tightest box around the points.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyInput` if `points` is empty.
    pub fn from_points(points: &[Point3i]) -> Result<Self> {
        let (first, rest) = points.split_first().ok_or(Error::EmptyInput("no points"))?;
        let mut bbox = BoundingBox::from_point(*first);
        for &p in rest {
            bbox.add_point(p);
        }
        let mut mask = Self::new(bbox)?;
        for &p in points {
            mask.set_on(p)?;
        }
        Ok(mask)
    }

    /// Get the bounding box
    #[inline]
    pub fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }

    /// Get the size of the bounding box
    #[inline]
    pub fn extent(&self) -> Extent {
        self.voxels.extent()
    }

    /// Switch on the voxel at a global point
    ///
    /// # Errors
    ///
    /// Returns `Error::PointOutOfBounds` if the point lies outside the box.
    pub fn set_on(&mut self, p: Point3i) -> Result<()> {
        self.voxels.set(p - self.bbox.min, ON)
    }

    /// Switch off the voxel at a global point
    ///
    /// # Errors
    ///
    /// Returns `Error::PointOutOfBounds` if the point lies outside the box.
    pub fn set_off(&mut self, p: Point3i) -> Result<()> {
        self.voxels.set(p - self.bbox.min, OFF)
    }

    /// Check whether a global point belongs to the object
    #[inline]
    pub fn contains(&self, p: Point3i) -> bool {
        self.bbox.contains(p)
            && self.voxels.value(self.voxels.extent().index(p - self.bbox.min)) == ON
    }

    /// Number of voxels that belong to the object
    pub fn num_voxels(&self) -> usize {
        self.voxels.data().iter().filter(|&&v| v == ON).count()
    }

    /// Whether no voxel belongs to the object
    pub fn is_empty(&self) -> bool {
        !self.voxels.data().contains(&ON)
    }

    /// The first member voxel in raster order, in global coordinates
    pub fn first_point(&self) -> Option<Point3i> {
        self.voxels
            .data()
            .iter()
            .position(|&v| v == ON)
            .map(|i| self.voxels.extent().point(i) + self.bbox.min)
    }

    /// All member voxels in raster order, in global coordinates
    pub fn points(&self) -> Vec<Point3i> {
        let extent = self.voxels.extent();
        self.voxels
            .data()
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v == ON)
            .map(|(i, _)| extent.point(i) + self.bbox.min)
            .collect()
    }

    /// Access the underlying membership buffer (box-local coordinates)
    pub fn voxels(&self) -> &VoxelBuffer<u8> {
        &self.voxels
    }
}
