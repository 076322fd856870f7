//! BoundingBox - Axis-aligned voxel regions
//!
//! A `BoundingBox` is an inclusive box in voxel space. It is the spatial
//! frame of every [`ObjectMask`](crate::ObjectMask) and is accumulated
//! voxel-by-voxel while regions are extracted from a label field.

use crate::error::{Error, Result};
use crate::extent::Extent;
use crate::point::Point3i;

/// An inclusive axis-aligned box in voxel space
///
/// Unlike a half-open rectangle, both `min` and `max` belong to the box, so
/// a single voxel is described by `min == max`.
///
/// # Examples
///
/// ```
/// use rainshed_core::{BoundingBox, Point3i};
///
/// let mut bbox = BoundingBox::from_point(Point3i::new(2, 2, 0));
/// bbox.add_point(Point3i::new(0, 4, 0));
/// assert_eq!(bbox.min, Point3i::new(0, 2, 0));
/// assert_eq!(bbox.max, Point3i::new(2, 4, 0));
/// assert_eq!(bbox.volume(), 9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    /// Minimum corner (inclusive)
    pub min: Point3i,
    /// Maximum corner (inclusive)
    pub max: Point3i,
}

impl BoundingBox {
    /// Create a box from two corners
    ///
    /// The corners are ordered so that `min <= max` on each axis.
    pub fn new(a: Point3i, b: Point3i) -> Self {
        Self {
            min: Point3i::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3i::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Create a box covering a single voxel
    #[inline]
    pub const fn from_point(p: Point3i) -> Self {
        Self { min: p, max: p }
    }

    /// Create a box covering a whole grid
    pub fn from_extent(extent: Extent) -> Self {
        Self {
            min: Point3i::origin(),
            max: Point3i::new(
                extent.x() as i32 - 1,
                extent.y() as i32 - 1,
                extent.z() as i32 - 1,
            ),
        }
    }

    /// Create a box from its minimum corner and a size
    pub fn from_corner_and_extent(corner: Point3i, extent: Extent) -> Self {
        Self {
            min: corner,
            max: Point3i::new(
                corner.x + extent.x() as i32 - 1,
                corner.y + extent.y() as i32 - 1,
                corner.z + extent.z() as i32 - 1,
            ),
        }
    }

    /// Size of the box along each axis
    pub fn extent(&self) -> Result<Extent> {
        Extent::new(
            (self.max.x - self.min.x + 1) as u32,
            (self.max.y - self.min.y + 1) as u32,
            (self.max.z - self.min.z + 1) as u32,
        )
    }

    /// Number of voxels in the box
    pub fn volume(&self) -> u64 {
        (self.max.x - self.min.x + 1) as u64
            * (self.max.y - self.min.y + 1) as u64
            * (self.max.z - self.min.z + 1) as u64
    }

    /// Grow the box so that it includes `p`
    #[inline]
    pub fn add_point(&mut self, p: Point3i) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// Check if a point is inside the box
    #[inline]
    pub fn contains(&self, p: Point3i) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Check if this box contains another box
    pub fn contains_box(&self, other: &BoundingBox) -> bool {
        self.contains(other.min) && self.contains(other.max)
    }

    /// Compute the smallest box enclosing both boxes
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let mut out = *self;
        out.add_point(other.min);
        out.add_point(other.max);
        out
    }

    /// Compute the intersection of two boxes
    pub fn intersect(&self, other: &BoundingBox) -> Option<BoundingBox> {
        let min = Point3i::new(
            self.min.x.max(other.min.x),
            self.min.y.max(other.min.y),
            self.min.z.max(other.min.z),
        );
        let max = Point3i::new(
            self.max.x.min(other.max.x),
            self.max.y.min(other.max.y),
            self.max.z.min(other.max.z),
        );
        if min.x <= max.x && min.y <= max.y && min.z <= max.z {
            Some(BoundingBox { min, max })
        } else {
            None
        }
    }

    /// Clip the box to fit within a grid
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if the box lies entirely outside.
    pub fn clip_to(&self, extent: Extent) -> Result<BoundingBox> {
        self.intersect(&BoundingBox::from_extent(extent))
            .ok_or_else(|| {
                Error::InvalidParameter(format!(
                    "box {:?}-{:?} lies outside a {}x{}x{} grid",
                    self.min,
                    self.max,
                    extent.x(),
                    extent.y(),
                    extent.z()
                ))
            })
    }

    /// Iterate over every point in the box in raster order
    pub fn points(&self) -> impl Iterator<Item = Point3i> + '_ {
        (self.min.z..=self.max.z).flat_map(move |z| {
            (self.min.y..=self.max.y)
                .flat_map(move |y| (self.min.x..=self.max.x).map(move |x| Point3i::new(x, y, z)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_orders_corners() {
        let b = BoundingBox::new(Point3i::new(5, 0, 2), Point3i::new(1, 3, 0));
        assert_eq!(b.min, Point3i::new(1, 0, 0));
        assert_eq!(b.max, Point3i::new(5, 3, 2));
        assert_eq!(b.volume(), 5 * 4 * 3);
    }

    #[test]
    fn test_extent() {
        let b = BoundingBox::new(Point3i::new(0, 0, 0), Point3i::new(4, 4, 0));
        assert_eq!(b.extent().unwrap().dimensions(), (5, 5, 1));
    }

    #[test]
    fn test_intersect_and_union() {
        let a = BoundingBox::new(Point3i::new(0, 0, 0), Point3i::new(3, 3, 3));
        let b = BoundingBox::new(Point3i::new(2, 2, 2), Point3i::new(5, 5, 5));
        let i = a.intersect(&b).unwrap();
        assert_eq!(i.min, Point3i::new(2, 2, 2));
        assert_eq!(i.max, Point3i::new(3, 3, 3));
        let u = a.union(&b);
        assert_eq!(u.max, Point3i::new(5, 5, 5));
        assert!(u.contains_box(&a));

        let far = BoundingBox::from_point(Point3i::new(10, 10, 10));
        assert!(a.intersect(&far).is_none());
    }

    #[test]
    fn test_clip_to() {
        let e = Extent::new(4, 4, 1).unwrap();
        let b = BoundingBox::new(Point3i::new(-2, 1, 0), Point3i::new(2, 9, 0));
        let c = b.clip_to(e).unwrap();
        assert_eq!(c.min, Point3i::new(0, 1, 0));
        assert_eq!(c.max, Point3i::new(2, 3, 0));

        let outside = BoundingBox::from_point(Point3i::new(7, 7, 0));
        assert!(outside.clip_to(e).is_err());
    }

    #[test]
    fn test_points_raster_order() {
        let b = BoundingBox::new(Point3i::new(1, 1, 0), Point3i::new(2, 2, 1));
        let pts: Vec<_> = b.points().collect();
        assert_eq!(pts.len(), 8);
        assert_eq!(pts[0], Point3i::new(1, 1, 0));
        assert_eq!(pts[1], Point3i::new(2, 1, 0));
        assert_eq!(pts[7], Point3i::new(2, 2, 1));
    }
}
