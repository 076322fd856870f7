//! Seed imposition
//!
//! Seeds are pre-labelled regions. Before the main pass each seed is
//! written into the label field as one resolved component, so that every
//! voxel draining into a seed joins it.

use super::encoding::{EncodedVoxels, VoxelCode};
use super::minima::MinimaStore;
use crate::conncomp::{Neighborhood, reachable_voxels};
use crate::error::{RegionError, RegionResult};
use rainshed_core::{ObjectCollection, ObjectMask};

/// Write every seed into the label field as a resolved component
///
/// The component identifier of a seed is the raster index of its first
/// voxel. When `minima` is given, each seed is also recorded there.
///
/// # Arguments
///
/// * `seeds` - Seed objects in global coordinates
/// * `labels` - Label field, expected to be entirely unvisited
/// * `neighborhood` - Adjacency a seed must be connected under
/// * `mask` - Optional containing mask every seed voxel must lie in
/// * `minima` - Optional store receiving the seeds
///
/// # Returns
///
/// The number of seed voxels written.
///
/// # Errors
///
/// - `RegionError::InvalidParameters` if a seed is empty
/// - `RegionError::DisconnectedSeed` if a seed is not one connected
///   component
/// - `RegionError::SeedOutOfBounds` if a seed voxel lies outside the grid
///   or the containing mask
/// - `RegionError::OverlappingSeeds` if a seed voxel is already labelled
pub fn impose_seeds(
    seeds: &ObjectCollection,
    labels: &mut EncodedVoxels,
    neighborhood: &Neighborhood,
    mask: Option<&ObjectMask>,
    mut minima: Option<&mut MinimaStore>,
) -> RegionResult<usize> {
    let extent = labels.extent();
    let mut written = 0;

    for (index, seed) in seeds.iter().enumerate() {
        let Some(first) = seed.first_point() else {
            return Err(RegionError::InvalidParameters(format!(
                "seed {} is empty",
                index
            )));
        };

        let (reached, total) = reachable_voxels(seed, neighborhood);
        if reached != total {
            return Err(RegionError::DisconnectedSeed {
                index,
                reached,
                total,
            });
        }

        let points = seed.points();
        for &p in &points {
            if !extent.contains(p) || mask.is_some_and(|m| !m.contains(p)) {
                return Err(RegionError::SeedOutOfBounds { index });
            }
            if labels.code(extent.index(p)) != VoxelCode::Unvisited {
                return Err(RegionError::OverlappingSeeds { index });
            }
        }

        let root = VoxelCode::Component(extent.index(first) as u32);
        for &p in &points {
            labels.set(extent.index(p), root);
        }
        written += points.len();

        if let Some(store) = minima.as_deref_mut() {
            store.add_points(points);
        }
    }

    log::debug!("imposed {} seeds covering {} voxels", seeds.len(), written);
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conncomp::Connectivity;
    use rainshed_core::{Extent, Point3i};

    fn setup() -> (EncodedVoxels, Neighborhood) {
        let labels = EncodedVoxels::new(Extent::new(5, 5, 1).unwrap()).unwrap();
        (labels, Neighborhood::new(Connectivity::Full, false))
    }

    fn seed(points: &[(i32, i32)]) -> ObjectMask {
        let pts: Vec<_> = points.iter().map(|&(x, y)| Point3i::new(x, y, 0)).collect();
        ObjectMask::from_points(&pts).unwrap()
    }

    #[test]
    fn test_seeds_become_components() {
        let (mut labels, nb) = setup();
        let seeds: ObjectCollection = vec![seed(&[(0, 0), (1, 1)]), seed(&[(4, 4)])].into();
        let mut store = MinimaStore::new();

        let written = impose_seeds(&seeds, &mut labels, &nb, None, Some(&mut store)).unwrap();
        assert_eq!(written, 3);
        assert_eq!(labels.code(0), VoxelCode::Component(0));
        assert_eq!(labels.code(6), VoxelCode::Component(0));
        assert_eq!(labels.code(24), VoxelCode::Component(24));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_disconnected_seed() {
        let (mut labels, _) = setup();
        let four = Neighborhood::new(Connectivity::Face, false);
        let seeds: ObjectCollection = vec![seed(&[(0, 0), (1, 1)])].into();
        let err = impose_seeds(&seeds, &mut labels, &four, None, None).unwrap_err();
        assert!(matches!(
            err,
            RegionError::DisconnectedSeed {
                index: 0,
                reached: 1,
                total: 2
            }
        ));
    }

    #[test]
    fn test_overlapping_and_out_of_bounds() {
        let (mut labels, nb) = setup();
        let seeds: ObjectCollection = vec![seed(&[(2, 2)]), seed(&[(2, 2), (3, 2)])].into();
        let err = impose_seeds(&seeds, &mut labels, &nb, None, None).unwrap_err();
        assert!(matches!(err, RegionError::OverlappingSeeds { index: 1 }));

        let (mut labels, nb) = setup();
        let seeds: ObjectCollection = vec![seed(&[(4, 4), (5, 4)])].into();
        let err = impose_seeds(&seeds, &mut labels, &nb, None, None).unwrap_err();
        assert!(matches!(err, RegionError::SeedOutOfBounds { index: 0 }));

        let (mut labels, nb) = setup();
        let region = seed(&[(0, 0), (1, 0)]);
        let seeds: ObjectCollection = vec![seed(&[(2, 0)])].into();
        let err = impose_seeds(&seeds, &mut labels, &nb, Some(&region), None).unwrap_err();
        assert!(matches!(err, RegionError::SeedOutOfBounds { index: 0 }));
    }

    #[test]
    fn test_empty_seed() {
        let (mut labels, nb) = setup();
        let bbox = rainshed_core::BoundingBox::from_point(Point3i::new(1, 1, 0));
        let seeds: ObjectCollection = vec![ObjectMask::new(bbox).unwrap()].into();
        let err = impose_seeds(&seeds, &mut labels, &nb, None, None).unwrap_err();
        assert!(matches!(err, RegionError::InvalidParameters(_)));
    }
}
