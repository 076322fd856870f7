//! Plateau resolution
//!
//! A plateau is a maximal connected region of voxels with equal intensity.
//! Steepest descent cannot choose a direction inside one, so the whole
//! region is flood-filled, split into edge voxels (those that can leave the
//! plateau downhill or into a seed) and inner voxels, and then made
//! lower-complete: every inner voxel is pointed, step by step, towards the
//! nearest edge voxel.

use super::encoding::{ChainCode, EncodedVoxels, VoxelCode};
use super::minima::MinimaStore;
use super::steepest::{Candidate, SteepestCalc, is_resolved};
use crate::error::{RegionError, RegionResult};
use rainshed_core::{Point3i, Sample};

/// A plateau voxel that can drain out of the plateau
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgePoint {
    /// Position of the voxel
    pub point: Point3i,
    /// Raster index of the voxel
    pub index: usize,
    /// Direction towards the lower or seeded neighbour
    pub code: ChainCode,
}

/// A plateau voxel with no way out other than through the plateau
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InnerPoint {
    /// Position of the voxel
    pub point: Point3i,
    /// Raster index of the voxel
    pub index: usize,
}

/// How a plateau was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlateauShape {
    /// Every voxel could drain directly
    EdgeOnly,
    /// No voxel could drain: the plateau is a regional minimum
    InnerOnly,
    /// Inner voxels were pointed towards the edge
    Mixed,
}

/// Edge and inner voxels of one plateau
///
/// Exists only while a single plateau is being resolved. Both lists are in
/// flood-fill order, so the first voxel of the plateau is the first entry
/// of whichever list it landed in.
#[derive(Debug, Clone, Default)]
pub struct EqualVoxelsPlateau {
    edge: Vec<EdgePoint>,
    inner: Vec<InnerPoint>,
}

impl EqualVoxelsPlateau {
    /// Edge voxels in flood-fill order
    pub fn edge_points(&self) -> &[EdgePoint] {
        &self.edge
    }

    /// Inner voxels in flood-fill order
    pub fn inner_points(&self) -> &[InnerPoint] {
        &self.inner
    }

    /// Total number of voxels in the plateau
    pub fn len(&self) -> usize {
        self.edge.len() + self.inner.len()
    }

    /// Whether the plateau has no voxels
    pub fn is_empty(&self) -> bool {
        self.edge.is_empty() && self.inner.is_empty()
    }

    /// Classify the plateau by which lists are populated
    pub fn shape(&self) -> PlateauShape {
        match (self.edge.is_empty(), self.inner.is_empty()) {
            (false, true) => PlateauShape::EdgeOnly,
            (true, _) => PlateauShape::InnerOnly,
            (false, false) => PlateauShape::Mixed,
        }
    }
}

/// Flood-fill the plateau containing `start`
///
/// Every plateau voxel is marked [`VoxelCode::Temporary`] as it is popped
/// from the stack. For each voxel, a neighbour that is a resolved component
/// wins, then the lowest strictly lower neighbour, then an equal neighbour
/// that has already been resolved; a voxel with none of these is inner.
/// Unvisited equal neighbours are pushed onto the stack.
///
/// # Arguments
///
/// * `calc` - Field, neighbourhood and containing mask
/// * `labels` - Label field; `start` must be unvisited
/// * `start` - A voxel of the plateau
pub fn find_equal_voxels<T: Sample>(
    calc: &SteepestCalc<'_, T>,
    labels: &mut EncodedVoxels,
    start: Point3i,
) -> EqualVoxelsPlateau {
    let field = calc.field();
    let extent = field.extent();
    let value = field.value(extent.index(start));
    let mut plateau = EqualVoxelsPlateau::default();
    let mut stack = vec![start];

    while let Some(p) = stack.pop() {
        let index = extent.index(p);
        if labels.code(index) != VoxelCode::Unvisited {
            continue;
        }
        labels.set(index, VoxelCode::Temporary);

        let mut component: Option<Candidate<T>> = None;
        let mut lowest: Option<Candidate<T>> = None;
        let mut equal_exit: Option<Candidate<T>> = None;

        for (d, q, qi) in calc.region_neighbors(p) {
            let code = labels.code(qi);
            let neighbor_value = field.value(qi);

            if code.is_component() {
                Candidate::offer(&mut component, d, neighbor_value);
            } else if neighbor_value == value {
                match code {
                    VoxelCode::Unvisited => stack.push(q),
                    c if is_resolved(c) => Candidate::offer(&mut equal_exit, d, neighbor_value),
                    _ => {}
                }
            } else if neighbor_value < value {
                Candidate::offer(&mut lowest, d, neighbor_value);
            }
        }

        match component.or(lowest).or(equal_exit) {
            Some(best) => plateau.edge.push(EdgePoint {
                point: p,
                index,
                code: best.code,
            }),
            None => plateau.inner.push(InnerPoint { point: p, index }),
        }
    }

    plateau
}

/// Make a flood-filled plateau lower-complete
///
/// - **Edge-only**: each edge voxel receives its recorded direction.
/// - **Inner-only**: every voxel receives the component identifier of the
///   first voxel of the plateau, and the plateau is recorded in `minima`
///   when given.
/// - **Mixed**: edge voxels receive their direction, then a breadth-first
///   sweep from the edge points each newly reached inner voxel back at the
///   voxel it was reached from.
///
/// # Errors
///
/// Returns `RegionError::InvariantViolation` if some inner voxel cannot be
/// reached from the edge.
pub fn make_lower_complete<T: Sample>(
    plateau: &EqualVoxelsPlateau,
    calc: &SteepestCalc<'_, T>,
    labels: &mut EncodedVoxels,
    minima: Option<&mut MinimaStore>,
) -> RegionResult<PlateauShape> {
    let shape = plateau.shape();

    for e in &plateau.edge {
        labels.set(e.index, VoxelCode::Direction(e.code));
    }

    match shape {
        PlateauShape::EdgeOnly => {}
        PlateauShape::InnerOnly => {
            let root = plateau.inner[0].index as u32;
            for i in &plateau.inner {
                labels.set(i.index, VoxelCode::Component(root));
            }
            if let Some(store) = minima {
                store.add_points(plateau.inner.iter().map(|i| i.point).collect());
            }
        }
        PlateauShape::Mixed => {
            let mut remaining = plateau.inner.len();
            let mut frontier: Vec<Point3i> = plateau.edge.iter().map(|e| e.point).collect();
            let mut next = Vec::new();

            while !frontier.is_empty() && remaining > 0 {
                for &p in &frontier {
                    for (d, q, qi) in calc.region_neighbors(p) {
                        if labels.code(qi) != VoxelCode::Temporary {
                            continue;
                        }
                        let back = ChainCode::from_offset(-d).ok_or_else(|| {
                            RegionError::InvariantViolation(format!(
                                "neighbour offset {:?} is not a chain code",
                                d
                            ))
                        })?;
                        labels.set(qi, VoxelCode::Direction(back));
                        remaining -= 1;
                        next.push(q);
                    }
                }
                std::mem::swap(&mut frontier, &mut next);
                next.clear();
            }

            if remaining > 0 {
                return Err(RegionError::InvariantViolation(format!(
                    "{} inner plateau voxels unreachable from the plateau edge",
                    remaining
                )));
            }
        }
    }

    log::trace!(
        "resolved {:?} plateau: {} edge, {} inner voxels",
        shape,
        plateau.edge.len(),
        plateau.inner.len()
    );

    Ok(shape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conncomp::{Connectivity, Neighborhood};
    use rainshed_core::{Extent, VoxelBuffer};

    fn field(values: &[u8], x: u32, y: u32) -> VoxelBuffer<u8> {
        VoxelBuffer::from_data(Extent::new(x, y, 1).unwrap(), values.to_vec()).unwrap()
    }

    #[test]
    fn test_flood_marks_temporary() {
        #[rustfmt::skip]
        let f = field(&[
            3, 5, 5, 5, 8,
            3, 5, 5, 5, 8,
            3, 5, 5, 5, 8,
        ], 5, 3);
        let nb = Neighborhood::new(Connectivity::Face, false);
        let calc = SteepestCalc::new(&f, &nb, None);
        let mut labels = EncodedVoxels::new(f.extent()).unwrap();

        let plateau = find_equal_voxels(&calc, &mut labels, Point3i::new(2, 1, 0));
        assert_eq!(plateau.len(), 9);
        assert_eq!(plateau.edge_points().len(), 3);
        assert_eq!(plateau.inner_points().len(), 6);
        assert_eq!(plateau.shape(), PlateauShape::Mixed);
        assert!(plateau.edge_points().iter().all(|e| e.point.x == 1));
        assert_eq!(labels.count_raw(super::super::encoding::is_temporary), 9);
    }

    #[test]
    fn test_mixed_plateau_points_towards_edge() {
        #[rustfmt::skip]
        let f = field(&[
            3, 5, 5, 5, 8,
            3, 5, 5, 5, 8,
        ], 5, 2);
        let nb = Neighborhood::new(Connectivity::Full, false);
        let calc = SteepestCalc::new(&f, &nb, None);
        let mut labels = EncodedVoxels::new(f.extent()).unwrap();

        let plateau = find_equal_voxels(&calc, &mut labels, Point3i::new(3, 0, 0));
        let shape = make_lower_complete(&plateau, &calc, &mut labels, None).unwrap();
        assert_eq!(shape, PlateauShape::Mixed);

        // Every plateau voxel now points strictly towards x = 0
        for y in 0..2 {
            for x in 1..4 {
                let code = labels.code_at(Point3i::new(x, y, 0)).unwrap();
                match code {
                    VoxelCode::Direction(c) => assert_eq!(c.offset().x, -1),
                    other => panic!("unexpected {:?} at ({}, {})", other, x, y),
                }
            }
        }
        assert_eq!(labels.count_raw(super::super::encoding::is_temporary), 0);
    }

    #[test]
    fn test_inner_only_plateau_is_minimum() {
        #[rustfmt::skip]
        let f = field(&[
            9, 9, 9, 9,
            9, 2, 2, 9,
            9, 9, 9, 9,
        ], 4, 3);
        let nb = Neighborhood::new(Connectivity::Full, false);
        let calc = SteepestCalc::new(&f, &nb, None);
        let mut labels = EncodedVoxels::new(f.extent()).unwrap();
        let mut store = MinimaStore::new();

        let plateau = find_equal_voxels(&calc, &mut labels, Point3i::new(2, 1, 0));
        let shape = make_lower_complete(&plateau, &calc, &mut labels, Some(&mut store)).unwrap();
        assert_eq!(shape, PlateauShape::InnerOnly);

        let root = f.extent().index(Point3i::new(2, 1, 0)) as u32;
        assert_eq!(labels.code_at(Point3i::new(1, 1, 0)).unwrap(), VoxelCode::Component(root));
        assert_eq!(labels.code_at(Point3i::new(2, 1, 0)).unwrap(), VoxelCode::Component(root));
        assert_eq!(store.len(), 1);
        assert_eq!(store.iter().next().unwrap().len(), 2);
    }

    #[test]
    fn test_edge_only_plateau() {
        #[rustfmt::skip]
        let f = field(&[
            1, 1, 1,
            4, 4, 4,
        ], 3, 2);
        let nb = Neighborhood::new(Connectivity::Face, false);
        let calc = SteepestCalc::new(&f, &nb, None);
        let mut labels = EncodedVoxels::new(f.extent()).unwrap();

        let plateau = find_equal_voxels(&calc, &mut labels, Point3i::new(0, 1, 0));
        let shape = make_lower_complete(&plateau, &calc, &mut labels, None).unwrap();
        assert_eq!(shape, PlateauShape::EdgeOnly);
        for x in 0..3 {
            assert_eq!(
                labels.code_at(Point3i::new(x, 1, 0)).unwrap(),
                VoxelCode::Direction(ChainCode::new(0, -1, 0).unwrap())
            );
        }
    }
}
