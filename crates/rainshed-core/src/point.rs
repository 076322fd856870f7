//! Point3i - Integer voxel coordinates
//!
//! A discrete 3D coordinate used to address voxels and to express relative
//! offsets between neighbouring voxels.

use std::ops::{Add, Neg, Sub};

/// A discrete 3D coordinate in voxel space.
///
/// Uses `i32` so that the same type can express both absolute positions and
/// signed offsets such as `(-1, 0, 1)`.
///
/// # Examples
///
/// ```
/// use rainshed_core::Point3i;
///
/// let p = Point3i::new(1, 2, 3);
/// let q = p + Point3i::new(-1, 0, 1);
/// assert_eq!(q, Point3i::new(0, 2, 4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Point3i {
    /// X coordinate (column)
    pub x: i32,
    /// Y coordinate (row)
    pub y: i32,
    /// Z coordinate (slice)
    pub z: i32,
}

impl Point3i {
    /// Create a new point
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The point at (0, 0, 0)
    #[inline]
    pub const fn origin() -> Self {
        Self { x: 0, y: 0, z: 0 }
    }

    /// Chebyshev distance to another point
    pub fn chebyshev_distance(&self, other: &Point3i) -> u32 {
        self.x
            .abs_diff(other.x)
            .max(self.y.abs_diff(other.y))
            .max(self.z.abs_diff(other.z))
    }
}

impl Add for Point3i {
    type Output = Point3i;

    #[inline]
    fn add(self, rhs: Point3i) -> Point3i {
        Point3i::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3i {
    type Output = Point3i;

    #[inline]
    fn sub(self, rhs: Point3i) -> Point3i {
        Point3i::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Point3i {
    type Output = Point3i;

    #[inline]
    fn neg(self) -> Point3i {
        Point3i::new(-self.x, -self.y, -self.z)
    }
}

impl From<(i32, i32, i32)> for Point3i {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}
