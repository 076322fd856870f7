//! Object extraction from a completed label field
//!
//! Extraction makes two passes: the first accumulates one bounding box per
//! component identifier, the second builds each object mask by testing
//! label equality inside its box.

use std::collections::HashMap;

use super::encoding::{EncodedVoxels, VoxelCode};
use crate::error::RegionResult;
use rainshed_core::{BoundingBox, ObjectCollection, ObjectMask, Point3i, VoxelBuffer};

/// Bounding box of every component, in order of first appearance
#[derive(Debug, Clone, Default)]
pub struct BoundingBoxMap {
    index: HashMap<u32, usize>,
    ids: Vec<u32>,
    boxes: Vec<BoundingBox>,
}

impl BoundingBoxMap {
    /// Number of components
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no component was found
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Dense index (0-based) of a raw component identifier
    pub fn dense_index(&self, id: u32) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Iterate over `(raw identifier, bounding box)` pairs in dense order
    pub fn iter(&self) -> impl Iterator<Item = (u32, BoundingBox)> + '_ {
        self.ids.iter().copied().zip(self.boxes.iter().copied())
    }

    fn add(&mut self, id: u32, p: Point3i) {
        match self.index.get(&id) {
            Some(&k) => self.boxes[k].add_point(p),
            None => {
                self.index.insert(id, self.ids.len());
                self.ids.push(id);
                self.boxes.push(BoundingBox::from_point(p));
            }
        }
    }
}

/// Accumulate the bounding box of every component in the label field
///
/// Components are numbered by the raster position of their first voxel.
pub fn build_bounding_box_map(labels: &EncodedVoxels) -> BoundingBoxMap {
    let extent = labels.extent();
    let mut map = BoundingBoxMap::default();
    for i in 0..extent.volume() {
        if let VoxelCode::Component(id) = labels.code(i) {
            map.add(id, extent.point(i));
        }
    }
    map
}

/// Build one object mask per component
///
/// # Errors
///
/// Propagates mask construction errors.
pub fn extract_objects(
    labels: &EncodedVoxels,
    map: &BoundingBoxMap,
) -> RegionResult<ObjectCollection> {
    let extent = labels.extent();
    let mut objects = ObjectCollection::with_capacity(map.len());

    for (id, bbox) in map.iter() {
        let mut mask = ObjectMask::new(bbox)?;
        for p in bbox.points() {
            if labels.code(extent.index(p)) == VoxelCode::Component(id) {
                mask.set_on(p)?;
            }
        }
        objects.push(mask);
    }

    Ok(objects)
}

/// Relabel components densely
///
/// The `k`-th component (0-based, in map order) receives label `k + 1`;
/// voxels with no component receive 0.
pub fn dense_labels(labels: &EncodedVoxels, map: &BoundingBoxMap) -> VoxelBuffer<u32> {
    let extent = labels.extent();
    let mut out = VoxelBuffer::new_with_value(extent, 0u32);
    for i in 0..extent.volume() {
        if let VoxelCode::Component(id) = labels.code(i) {
            if let Some(k) = map.dense_index(id) {
                out.set_value(i, k as u32 + 1);
            }
        }
    }
    out
}
