//! Object selection by size
//!
//! Segmentation keeps every basin it finds, however small. This module
//! provides the filter a pipeline applies afterwards to discard regions
//! that are too small to be meaningful.

use rainshed_core::{ObjectCollection, ObjectMask};

/// Size thresholds for [`select_by_size`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizeThresholds {
    /// Minimum number of voxels
    pub min_voxels: usize,
    /// Minimum bounding-box size along (x, y, z)
    pub min_extent: (u32, u32, u32),
}

impl SizeThresholds {
    /// Create thresholds that keep every object
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum voxel count
    pub fn with_min_voxels(mut self, min_voxels: usize) -> Self {
        self.min_voxels = min_voxels;
        self
    }

    /// Set the minimum bounding-box size
    pub fn with_min_extent(mut self, x: u32, y: u32, z: u32) -> Self {
        self.min_extent = (x, y, z);
        self
    }

    /// Whether `object` satisfies every threshold
    pub fn accepts(&self, object: &ObjectMask) -> bool {
        let (x, y, z) = object.extent().dimensions();
        x >= self.min_extent.0
            && y >= self.min_extent.1
            && z >= self.min_extent.2
            && object.num_voxels() >= self.min_voxels
    }
}

/// Select objects whose size satisfies the thresholds
///
/// The relative order of the kept objects is preserved.
///
/// # Examples
///
/// ```
/// use rainshed_core::{ObjectCollection, ObjectMask, Point3i};
/// use rainshed_region::{SizeThresholds, select_by_size};
///
/// let objects: ObjectCollection = vec![
///     ObjectMask::from_points(&[Point3i::new(0, 0, 0)]).unwrap(),
///     ObjectMask::from_points(&[Point3i::new(2, 0, 0), Point3i::new(3, 0, 0)]).unwrap(),
/// ]
/// .into();
///
/// let kept = select_by_size(&objects, &SizeThresholds::new().with_min_voxels(2));
/// assert_eq!(kept.len(), 1);
/// ```
pub fn select_by_size(objects: &ObjectCollection, thresholds: &SizeThresholds) -> ObjectCollection {
    objects
        .iter()
        .filter(|object| thresholds.accepts(object))
        .cloned()
        .collect()
}
