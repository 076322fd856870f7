//! Connected component analysis
//!
//! This module provides voxel neighbourhoods and functions for splitting a
//! binary object mask into its connected components. Flood fills use an
//! explicit stack so that memory is bounded by the size of one component.

use crate::error::RegionResult;
use rainshed_core::{Extent, ObjectCollection, ObjectMask, Point3i, VoxelBuffer};

/// Connectivity type for neighbourhoods
///
/// The number of neighbours depends on whether the neighbourhood is 2D or
/// 3D:
///
/// | Connectivity | 2D | 3D |
/// |--------------|----|----|
/// | `Face`       | 4  | 6  |
/// | `FaceEdge`   | 8  | 18 |
/// | `Full`       | 8  | 26 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    /// Neighbours share a face (4-way / 6-way)
    Face,
    /// Neighbours share a face or an edge (8-way / 18-way)
    FaceEdge,
    /// Neighbours share a face, an edge or a corner (8-way / 26-way)
    #[default]
    Full,
}

impl Connectivity {
    /// Largest number of non-zero offset components a neighbour may have
    fn max_axes(self) -> i32 {
        match self {
            Connectivity::Face => 1,
            Connectivity::FaceEdge => 2,
            Connectivity::Full => 3,
        }
    }
}

/// A precomputed list of neighbour offsets
///
/// Offsets are ordered z-major, then y, then x, each running from -1 to 1,
/// with the origin skipped. This order is the tie-break wherever the first
/// of several equally good neighbours wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighborhood {
    offsets: Vec<Point3i>,
    do_3d: bool,
}

impl Neighborhood {
    /// Create a neighbourhood
    ///
    /// # Arguments
    ///
    /// * `connectivity` - Which neighbours are adjacent
    /// * `do_3d` - Whether neighbours in adjacent slices are included
    pub fn new(connectivity: Connectivity, do_3d: bool) -> Self {
        let z_range = if do_3d { -1..=1 } else { 0..=0 };
        let mut offsets = Vec::with_capacity(26);
        for dz in z_range {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let axes = (dx != 0) as i32 + (dy != 0) as i32 + (dz != 0) as i32;
                    if axes == 0 || axes > connectivity.max_axes() {
                        continue;
                    }
                    offsets.push(Point3i::new(dx, dy, dz));
                }
            }
        }
        Self { offsets, do_3d }
    }

    /// Number of neighbours
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether the neighbourhood is empty (never true for a valid one)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Whether neighbours in adjacent slices are included
    #[inline]
    pub fn is_3d(&self) -> bool {
        self.do_3d
    }

    /// The neighbour offsets in iteration order
    #[inline]
    pub fn offsets(&self) -> &[Point3i] {
        &self.offsets
    }

    /// Neighbours of `p` that lie inside `extent`, as `(offset, point)`
    pub fn neighbors(
        &self,
        p: Point3i,
        extent: Extent,
    ) -> impl Iterator<Item = (Point3i, Point3i)> + '_ {
        self.offsets
            .iter()
            .map(move |&d| (d, p + d))
            .filter(move |&(_, q)| extent.contains(q))
    }
}

/// Split a mask into its connected components
///
/// Components are returned in the order of their first voxel in raster
/// order.
///
/// # Arguments
///
/// * `mask` - Input object mask
/// * `neighborhood` - Adjacency used to connect voxels
pub fn connected_components(
    mask: &ObjectMask,
    neighborhood: &Neighborhood,
) -> RegionResult<ObjectCollection> {
    let local = mask.voxels();
    let extent = local.extent();
    let origin = mask.bounding_box().min;
    let mut visited = VoxelBuffer::<u8>::new(extent);
    let mut components = ObjectCollection::new();
    let mut stack = Vec::new();

    for start in 0..extent.volume() {
        if local.value(start) == 0 || visited.value(start) != 0 {
            continue;
        }

        let mut points = Vec::new();
        visited.set_value(start, 1);
        stack.push(extent.point(start));

        while let Some(p) = stack.pop() {
            points.push(p + origin);
            for (_, q) in neighborhood.neighbors(p, extent) {
                let qi = extent.index(q);
                if local.value(qi) != 0 && visited.value(qi) == 0 {
                    visited.set_value(qi, 1);
                    stack.push(q);
                }
            }
        }

        points.sort_by_key(|p| (p.z, p.y, p.x));
        components.push(ObjectMask::from_points(&points)?);
    }

    Ok(components)
}

/// Count the voxels of `mask` reachable from its first voxel
///
/// Returns `(reached, total)`.
pub fn reachable_voxels(mask: &ObjectMask, neighborhood: &Neighborhood) -> (usize, usize) {
    let local = mask.voxels();
    let extent = local.extent();
    let total = mask.num_voxels();
    let Some(start) = local.data().iter().position(|&v| v != 0) else {
        return (0, 0);
    };

    let mut visited = VoxelBuffer::<u8>::new(extent);
    let mut stack = vec![extent.point(start)];
    visited.set_value(start, 1);
    let mut reached = 0;

    while let Some(p) = stack.pop() {
        reached += 1;
        for (_, q) in neighborhood.neighbors(p, extent) {
            let qi = extent.index(q);
            if local.value(qi) != 0 && visited.value(qi) == 0 {
                visited.set_value(qi, 1);
                stack.push(q);
            }
        }
    }

    (reached, total)
}

/// Check whether a mask is a single connected component
///
/// An empty mask is not connected.
pub fn is_connected(mask: &ObjectMask, neighborhood: &Neighborhood) -> bool {
    let (reached, total) = reachable_voxels(mask, neighborhood);
    total > 0 && reached == total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighborhood_sizes() {
        assert_eq!(Neighborhood::new(Connectivity::Face, false).len(), 4);
        assert_eq!(Neighborhood::new(Connectivity::FaceEdge, false).len(), 8);
        assert_eq!(Neighborhood::new(Connectivity::Full, false).len(), 8);
        assert_eq!(Neighborhood::new(Connectivity::Face, true).len(), 6);
        assert_eq!(Neighborhood::new(Connectivity::FaceEdge, true).len(), 18);
        assert_eq!(Neighborhood::new(Connectivity::Full, true).len(), 26);
    }

    #[test]
    fn test_neighborhood_order() {
        let nb = Neighborhood::new(Connectivity::Full, true);
        assert_eq!(nb.offsets()[0], Point3i::new(-1, -1, -1));
        assert_eq!(nb.offsets()[25], Point3i::new(1, 1, 1));
        assert!(!nb.offsets().contains(&Point3i::origin()));
    }

    #[test]
    fn test_neighbors_clipped() {
        let nb = Neighborhood::new(Connectivity::Full, false);
        let e = Extent::new(3, 3, 1).unwrap();
        assert_eq!(nb.neighbors(Point3i::new(0, 0, 0), e).count(), 3);
        assert_eq!(nb.neighbors(Point3i::new(1, 1, 0), e).count(), 8);
    }

    #[test]
    fn test_connected_components_diagonal() {
        let pts = [Point3i::new(0, 0, 0), Point3i::new(1, 1, 0), Point3i::new(3, 3, 0)];
        let mask = ObjectMask::from_points(&pts).unwrap();

        let four = Neighborhood::new(Connectivity::Face, false);
        let comps = connected_components(&mask, &four).unwrap();
        assert_eq!(comps.len(), 3);
        assert!(!is_connected(&mask, &four));

        let eight = Neighborhood::new(Connectivity::Full, false);
        let comps = connected_components(&mask, &eight).unwrap();
        assert_eq!(comps.len(), 2);
        assert_eq!(comps.get(0).unwrap().num_voxels(), 2);
        assert_eq!(comps.get(1).unwrap().first_point(), Some(Point3i::new(3, 3, 0)));
    }

    #[test]
    fn test_is_connected_across_slices() {
        let pts = [Point3i::new(1, 1, 0), Point3i::new(1, 1, 1)];
        let mask = ObjectMask::from_points(&pts).unwrap();
        assert!(is_connected(&mask, &Neighborhood::new(Connectivity::Face, true)));
        assert!(!is_connected(&mask, &Neighborhood::new(Connectivity::Full, false)));
        assert_eq!(
            reachable_voxels(&mask, &Neighborhood::new(Connectivity::Full, false)),
            (1, 2)
        );
    }
}
