//! ObjectCollection - Ordered list of object masks
//!
//! The unit of exchange between the segmentation engine and the rest of a
//! pipeline: seeds go in as an `ObjectCollection`, segmented regions come
//! out as one.

use crate::bbox::BoundingBox;
use crate::mask::ObjectMask;

/// An ordered collection of [`ObjectMask`]s
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectCollection {
    objects: Vec<ObjectMask>,
}

impl ObjectCollection {
    /// Create a new empty collection
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Create a collection with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            objects: Vec::with_capacity(capacity),
        }
    }

    /// Get the number of objects
    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Get an object by index
    pub fn get(&self, index: usize) -> Option<&ObjectMask> {
        self.objects.get(index)
    }

    /// Add an object
    pub fn push(&mut self, object: ObjectMask) {
        self.objects.push(object);
    }

    /// Iterate over the objects
    pub fn iter(&self) -> std::slice::Iter<'_, ObjectMask> {
        self.objects.iter()
    }

    /// Access the objects as a slice
    pub fn as_slice(&self) -> &[ObjectMask] {
        &self.objects
    }

    /// Sum of the voxel counts of every object
    pub fn total_voxels(&self) -> usize {
        self.objects.iter().map(ObjectMask::num_voxels).sum()
    }

    /// Bounding boxes of every object, in order
    pub fn bounding_boxes(&self) -> Vec<BoundingBox> {
        self.objects.iter().map(ObjectMask::bounding_box).collect()
    }
}

impl FromIterator<ObjectMask> for ObjectCollection {
    fn from_iter<I: IntoIterator<Item = ObjectMask>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ObjectCollection {
    type Item = ObjectMask;
    type IntoIter = std::vec::IntoIter<ObjectMask>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.into_iter()
    }
}

impl<'a> IntoIterator for &'a ObjectCollection {
    type Item = &'a ObjectMask;
    type IntoIter = std::slice::Iter<'a, ObjectMask>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}

impl From<Vec<ObjectMask>> for ObjectCollection {
    fn from(objects: Vec<ObjectMask>) -> Self {
        Self { objects }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point3i;

    #[test]
    fn test_push_and_totals() {
        let mut objects = ObjectCollection::new();
        assert!(objects.is_empty());
        objects.push(ObjectMask::from_points(&[Point3i::new(0, 0, 0)]).unwrap());
        objects.push(
            ObjectMask::from_points(&[Point3i::new(3, 3, 0), Point3i::new(4, 3, 0)]).unwrap(),
        );
        assert_eq!(objects.len(), 2);
        assert_eq!(objects.total_voxels(), 3);
        let boxes = objects.bounding_boxes();
        assert_eq!(boxes[1].max, Point3i::new(4, 3, 0));
        assert!(objects.get(2).is_none());
    }

    #[test]
    fn test_from_iterator() {
        let objects: ObjectCollection = (0..4)
            .map(|i| ObjectMask::from_points(&[Point3i::new(i, 0, 0)]).unwrap())
            .collect();
        assert_eq!(objects.len(), 4);
        assert_eq!(objects.iter().count(), 4);
    }
}
