//! Steepest-descent direction of a single voxel

use super::encoding::{ChainCode, EncodedVoxels, VoxelCode};
use crate::conncomp::Neighborhood;
use rainshed_core::{ObjectMask, Point3i, Sample, VoxelBuffer};

/// Outcome of examining one voxel's neighbourhood
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descent {
    /// Drain towards the neighbour at this offset
    Direction(ChainCode),
    /// No neighbour is lower or equal
    Minima,
    /// An equal neighbour was found before any resolved component
    Plateau,
}

/// Best candidate seen so far while scanning a neighbourhood
#[derive(Debug, Clone, Copy)]
pub(crate) struct Candidate<T> {
    pub(crate) code: ChainCode,
    pub(crate) value: T,
}

impl<T: Sample> Candidate<T> {
    /// Replace `best` if `value` is strictly lower (first wins on ties)
    #[inline]
    pub(crate) fn offer(best: &mut Option<Self>, offset: Point3i, value: T) {
        if best.is_none_or(|b| value < b.value) {
            if let Some(code) = ChainCode::from_offset(offset) {
                *best = Some(Candidate { code, value });
            }
        }
    }
}

/// Computes the steepest-descent direction of voxels
///
/// The calculator reads the intensity field and the current label field.
/// When a containing mask is given, neighbours outside it are skipped
/// entirely.
#[derive(Debug)]
pub struct SteepestCalc<'a, T> {
    field: &'a VoxelBuffer<T>,
    neighborhood: &'a Neighborhood,
    mask: Option<&'a ObjectMask>,
}

impl<'a, T: Sample> SteepestCalc<'a, T> {
    /// Create a calculator
    pub fn new(
        field: &'a VoxelBuffer<T>,
        neighborhood: &'a Neighborhood,
        mask: Option<&'a ObjectMask>,
    ) -> Self {
        Self {
            field,
            neighborhood,
            mask,
        }
    }

    /// The intensity field
    #[inline]
    pub fn field(&self) -> &'a VoxelBuffer<T> {
        self.field
    }

    /// Whether a point takes part in the segmentation
    #[inline]
    pub fn in_region(&self, p: Point3i) -> bool {
        self.mask.is_none_or(|m| m.contains(p))
    }

    /// Neighbours of `p` inside the grid and the region
    ///
    /// Yields `(offset, point, raster index)` in neighbourhood order.
    pub fn region_neighbors(
        &self,
        p: Point3i,
    ) -> impl Iterator<Item = (Point3i, Point3i, usize)> + '_ {
        let extent = self.field.extent();
        self.neighborhood
            .neighbors(p, extent)
            .filter(move |&(_, q)| self.in_region(q))
            .map(move |(d, q)| (d, q, extent.index(q)))
    }

    /// Find the steepest-descent direction of the voxel at `p`
    ///
    /// A neighbour that already belongs to a resolved component takes
    /// precedence over any intensity ordering; among several such
    /// neighbours the lowest wins. Otherwise an equal neighbour ends the
    /// scan with [`Descent::Plateau`], and failing that the strictly lowest
    /// neighbour is chosen. Ties go to the first neighbour in iteration
    /// order.
    ///
    /// # Arguments
    ///
    /// * `labels` - Current label field
    /// * `p` - The voxel
    /// * `value` - Intensity of the voxel
    pub fn calc(&self, labels: &EncodedVoxels, p: Point3i, value: T) -> Descent {
        let mut component: Option<Candidate<T>> = None;
        let mut lowest: Option<Candidate<T>> = None;

        for (d, _, qi) in self.region_neighbors(p) {
            let neighbor_value = self.field.value(qi);

            if labels.code(qi).is_component() {
                Candidate::offer(&mut component, d, neighbor_value);
            } else if component.is_some() {
                continue;
            } else if neighbor_value == value {
                return Descent::Plateau;
            } else if neighbor_value < value {
                Candidate::offer(&mut lowest, d, neighbor_value);
            }
        }

        match component.or(lowest) {
            Some(best) => Descent::Direction(best.code),
            None => Descent::Minima,
        }
    }

    /// Convenience for callers holding only the voxel's point
    pub fn calc_at(&self, labels: &EncodedVoxels, p: Point3i) -> Descent {
        let value = self.field.value(self.field.extent().index(p));
        self.calc(labels, p, value)
    }
}

/// Whether a decoded state counts as resolved for plateau classification
#[inline]
pub(crate) fn is_resolved(code: VoxelCode) -> bool {
    matches!(
        code,
        VoxelCode::Direction(_) | VoxelCode::Minima | VoxelCode::Component(_)
    )
}
