//! Conversion of the label field into components

use super::encoding::{EncodedVoxels, VoxelCode};
use crate::error::{RegionError, RegionResult};
use rainshed_core::ObjectMask;

/// Replace every direction and minimum by a component identifier
///
/// A minimum receives its own raster index as identifier. A voxel holding
/// a chain code follows the chain until it reaches a component or a
/// minimum, and every voxel on the path receives that identifier. Paths
/// are rewritten as they are resolved, so each voxel is followed at most
/// once.
///
/// # Errors
///
/// Returns `RegionError::InvariantViolation` if a chain leaves the grid,
/// reaches a voxel that is neither a direction, minimum nor component, or
/// is longer than the grid has voxels. Unvisited voxels are only accepted
/// outside `mask`.
pub fn convert_all_to_components(
    labels: &mut EncodedVoxels,
    mask: Option<&ObjectMask>,
) -> RegionResult<()> {
    let extent = labels.extent();
    let volume = extent.volume();
    let mut path = Vec::new();

    for start in 0..volume {
        match labels.code(start) {
            VoxelCode::Component(_) => continue,
            VoxelCode::Minima => {
                labels.set(start, VoxelCode::Component(start as u32));
                continue;
            }
            VoxelCode::Unvisited if mask.is_some_and(|m| !m.contains(extent.point(start))) => {
                continue;
            }
            VoxelCode::Direction(_) => {}
            other => {
                return Err(RegionError::InvariantViolation(format!(
                    "voxel {:?} left in state {:?}",
                    extent.point(start),
                    other
                )));
            }
        }

        path.clear();
        let mut current = start;
        let id = loop {
            match labels.code(current) {
                VoxelCode::Component(id) => break id,
                VoxelCode::Minima => {
                    labels.set(current, VoxelCode::Component(current as u32));
                    break current as u32;
                }
                VoxelCode::Direction(code) => {
                    if path.len() >= volume {
                        return Err(RegionError::InvariantViolation(format!(
                            "chain from {:?} does not terminate",
                            extent.point(start)
                        )));
                    }
                    path.push(current);
                    let next = extent.point(current) + code.offset();
                    if !extent.contains(next) {
                        return Err(RegionError::InvariantViolation(format!(
                            "chain from {:?} leaves the grid at {:?}",
                            extent.point(start),
                            next
                        )));
                    }
                    current = extent.index(next);
                }
                other => {
                    return Err(RegionError::InvariantViolation(format!(
                        "chain from {:?} reaches {:?} at {:?}",
                        extent.point(start),
                        other,
                        extent.point(current)
                    )));
                }
            }
        };

        for &i in &path {
            labels.set(i, VoxelCode::Component(id));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::watershed::encoding::ChainCode;
    use rainshed_core::{Extent, Point3i};

    fn right() -> VoxelCode {
        VoxelCode::Direction(ChainCode::new(1, 0, 0).unwrap())
    }

    fn left() -> VoxelCode {
        VoxelCode::Direction(ChainCode::new(-1, 0, 0).unwrap())
    }

    #[test]
    fn test_chains_resolve_to_roots() {
        let mut labels = EncodedVoxels::new(Extent::new(5, 1, 1).unwrap()).unwrap();
        labels.set(0, right());
        labels.set(1, right());
        labels.set(2, VoxelCode::Minima);
        labels.set(3, right());
        labels.set(4, VoxelCode::Component(99));

        convert_all_to_components(&mut labels, None).unwrap();
        assert_eq!(labels.code(0), VoxelCode::Component(2));
        assert_eq!(labels.code(1), VoxelCode::Component(2));
        assert_eq!(labels.code(2), VoxelCode::Component(2));
        assert_eq!(labels.code(3), VoxelCode::Component(99));
    }

    #[test]
    fn test_cycle_is_invariant_violation() {
        let mut labels = EncodedVoxels::new(Extent::new(2, 1, 1).unwrap()).unwrap();
        labels.set(0, right());
        labels.set(1, left());
        let err = convert_all_to_components(&mut labels, None).unwrap_err();
        assert!(matches!(err, RegionError::InvariantViolation(_)));
    }

    #[test]
    fn test_chain_off_grid() {
        let mut labels = EncodedVoxels::new(Extent::new(2, 1, 1).unwrap()).unwrap();
        labels.set(0, left());
        labels.set(1, VoxelCode::Minima);
        assert!(convert_all_to_components(&mut labels, None).is_err());
    }

    #[test]
    fn test_unvisited_only_outside_mask() {
        let mut labels = EncodedVoxels::new(Extent::new(3, 1, 1).unwrap()).unwrap();
        labels.set(0, VoxelCode::Minima);
        labels.set(1, left());
        assert!(convert_all_to_components(&mut labels.clone(), None).is_err());

        let mask =
            ObjectMask::from_points(&[Point3i::new(0, 0, 0), Point3i::new(1, 0, 0)]).unwrap();
        convert_all_to_components(&mut labels, Some(&mask)).unwrap();
        assert_eq!(labels.code(1), VoxelCode::Component(0));
        assert_eq!(labels.code(2), VoxelCode::Unvisited);
    }
}
