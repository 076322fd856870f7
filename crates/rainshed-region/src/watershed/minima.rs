//! Collected local minima

use crate::error::RegionResult;
use rainshed_core::{ObjectCollection, ObjectMask, Point3i};

/// Ordered list of the minima found during a run
///
/// Each entry is a set of global points: a single voxel for an isolated
/// minimum, every voxel of a plateau minimum, or the voxels of a seed.
/// Entries keep the order in which they were discovered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MinimaStore {
    minima: Vec<Vec<Point3i>>,
}

impl MinimaStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a single-voxel minimum
    pub fn add_point(&mut self, p: Point3i) {
        self.minima.push(vec![p]);
    }

    /// Record a multi-voxel minimum
    ///
    /// Empty lists are ignored.
    pub fn add_points(&mut self, points: Vec<Point3i>) {
        if !points.is_empty() {
            self.minima.push(points);
        }
    }

    /// Number of minima recorded
    pub fn len(&self) -> usize {
        self.minima.len()
    }

    /// Whether no minimum has been recorded
    pub fn is_empty(&self) -> bool {
        self.minima.is_empty()
    }

    /// Iterate over the minima in discovery order
    pub fn iter(&self) -> impl Iterator<Item = &[Point3i]> {
        self.minima.iter().map(Vec::as_slice)
    }

    /// Convert every minimum into an object mask
    ///
    /// # Errors
    ///
    /// Propagates mask construction errors.
    pub fn into_objects(self) -> RegionResult<ObjectCollection> {
        let mut objects = ObjectCollection::with_capacity(self.minima.len());
        for points in self.minima {
            objects.push(ObjectMask::from_points(&points)?);
        }
        Ok(objects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_order_and_objects() {
        let mut store = MinimaStore::new();
        assert!(store.is_empty());
        store.add_point(Point3i::new(4, 4, 0));
        store.add_points(Vec::new());
        store.add_points(vec![Point3i::new(0, 0, 0), Point3i::new(1, 0, 0)]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.iter().next(), Some(&[Point3i::new(4, 4, 0)][..]));

        let objects = store.into_objects().unwrap();
        assert_eq!(objects.len(), 2);
        assert_eq!(objects.get(0).unwrap().num_voxels(), 1);
        assert_eq!(objects.get(1).unwrap().num_voxels(), 2);
    }
}
