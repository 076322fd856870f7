//! Voxel state encoding
//!
//! Every voxel of the label field carries exactly one state, packed into a
//! single `u32`:
//!
//! | Raw value            | State                                  |
//! |----------------------|----------------------------------------|
//! | `0`                  | unvisited                              |
//! | `1`                  | temporary (plateau flood fill only)    |
//! | `2`                  | local minimum, no component yet        |
//! | `3`                  | plateau, resolved before the pass ends |
//! | `4..=30`             | chain code for an offset in `{-1,0,1}³` |
//! | `31..`               | connected-component identifier         |
//!
//! The algorithm itself works on the decoded [`VoxelCode`]; raw values only
//! appear at the storage boundary in [`EncodedVoxels`].

use crate::error::{RegionError, RegionResult};
use rainshed_core::{Extent, Point3i, VoxelBuffer};

/// Raw code of a voxel not yet visited
pub const UNVISITED: u32 = 0;
/// Raw code of a voxel inside a plateau being flood-filled
pub const TEMPORARY: u32 = 1;
/// Raw code of a local minimum without a component identifier
pub const MINIMA: u32 = 2;
/// Raw code of a voxel whose lowest neighbour has equal intensity
pub const PLATEAU: u32 = 3;
/// Raw code of the first chain code
pub const DIRECTION_BASE: u32 = 4;
/// Number of chain codes
pub const NUM_DIRECTIONS: u32 = 27;
/// Raw code of connected-component identifier zero
pub const COMPONENT_BASE: u32 = DIRECTION_BASE + NUM_DIRECTIONS;

/// Largest raw component identifier that can be encoded
pub const MAX_COMPONENT_ID: u32 = u32::MAX - COMPONENT_BASE;

/// A relative offset `(dx, dy, dz)` with every component in `{-1, 0, 1}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainCode {
    dx: i8,
    dy: i8,
    dz: i8,
}

impl ChainCode {
    /// Create a chain code
    ///
    /// Returns `None` if any component is outside `{-1, 0, 1}`.
    pub fn new(dx: i32, dy: i32, dz: i32) -> Option<Self> {
        let ok = |v: i32| (-1..=1).contains(&v);
        (ok(dx) && ok(dy) && ok(dz)).then_some(Self {
            dx: dx as i8,
            dy: dy as i8,
            dz: dz as i8,
        })
    }

    /// Create a chain code from a neighbour offset
    ///
    /// Returns `None` if the offset does not reach an adjacent voxel.
    pub fn from_offset(offset: Point3i) -> Option<Self> {
        Self::new(offset.x, offset.y, offset.z)
    }

    /// The offset this code points along
    #[inline]
    pub fn offset(&self) -> Point3i {
        Point3i::new(self.dx as i32, self.dy as i32, self.dz as i32)
    }

    /// The code pointing the opposite way
    #[inline]
    pub fn reversed(&self) -> Self {
        Self {
            dx: -self.dx,
            dy: -self.dy,
            dz: -self.dz,
        }
    }
}

/// Encode an offset as a raw chain code
///
/// # Panics
///
/// Debug builds panic if any component is outside `{-1, 0, 1}`.
#[inline]
pub fn encode_direction(dx: i32, dy: i32, dz: i32) -> u32 {
    debug_assert!(ChainCode::new(dx, dy, dz).is_some());
    DIRECTION_BASE + (dx + 1) as u32 + 3 * (dy + 1) as u32 + 9 * (dz + 1) as u32
}

/// Decode a raw chain code into its offset
///
/// The caller must have checked [`is_direction_code`].
#[inline]
pub fn decode_direction(code: u32) -> (i32, i32, i32) {
    debug_assert!(is_direction_code(code));
    let v = (code - DIRECTION_BASE) as i32;
    (v % 3 - 1, (v / 3) % 3 - 1, v / 9 - 1)
}

/// Whether a raw code is a chain code
#[inline]
pub fn is_direction_code(code: u32) -> bool {
    (DIRECTION_BASE..COMPONENT_BASE).contains(&code)
}

/// Whether a raw code is a connected-component identifier
#[inline]
pub fn is_component_id(code: u32) -> bool {
    code >= COMPONENT_BASE
}

/// Whether a raw code marks a local minimum
#[inline]
pub fn is_minima(code: u32) -> bool {
    code == MINIMA
}

/// Whether a raw code marks a plateau voxel
#[inline]
pub fn is_plateau(code: u32) -> bool {
    code == PLATEAU
}

/// Whether a raw code marks a temporary flood-fill voxel
#[inline]
pub fn is_temporary(code: u32) -> bool {
    code == TEMPORARY
}

/// Whether a raw code marks an unvisited voxel
#[inline]
pub fn is_unvisited(code: u32) -> bool {
    code == UNVISITED
}

/// Decoded state of one voxel of the label field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoxelCode {
    /// Not yet visited
    Unvisited,
    /// Member of the plateau currently being flood-filled
    Temporary,
    /// Local minimum awaiting a component identifier
    Minima,
    /// Lowest neighbour has equal intensity
    Plateau,
    /// Belongs to whatever component the neighbour at this offset joins
    Direction(ChainCode),
    /// Resolved connected component (raw identifier, without the base)
    Component(u32),
}

impl VoxelCode {
    /// Pack into a raw code
    ///
    /// # Panics
    ///
    /// Debug builds panic if a component identifier exceeds
    /// [`MAX_COMPONENT_ID`].
    #[inline]
    pub fn encode(self) -> u32 {
        match self {
            VoxelCode::Unvisited => UNVISITED,
            VoxelCode::Temporary => TEMPORARY,
            VoxelCode::Minima => MINIMA,
            VoxelCode::Plateau => PLATEAU,
            VoxelCode::Direction(c) => encode_direction(c.dx as i32, c.dy as i32, c.dz as i32),
            VoxelCode::Component(id) => {
                debug_assert!(id <= MAX_COMPONENT_ID);
                COMPONENT_BASE + id
            }
        }
    }

    /// Unpack a raw code
    #[inline]
    pub fn decode(code: u32) -> Self {
        match code {
            UNVISITED => VoxelCode::Unvisited,
            TEMPORARY => VoxelCode::Temporary,
            MINIMA => VoxelCode::Minima,
            PLATEAU => VoxelCode::Plateau,
            c if is_direction_code(c) => {
                let (dx, dy, dz) = decode_direction(c);
                VoxelCode::Direction(ChainCode {
                    dx: dx as i8,
                    dy: dy as i8,
                    dz: dz as i8,
                })
            }
            c => VoxelCode::Component(c - COMPONENT_BASE),
        }
    }

    /// Whether this is a resolved component
    #[inline]
    pub fn is_component(&self) -> bool {
        matches!(self, VoxelCode::Component(_))
    }
}

/// The label field: one encoded state per voxel
///
/// Every voxel starts [`VoxelCode::Unvisited`]. A completed run leaves only
/// components (and unvisited voxels outside a containing mask).
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedVoxels {
    codes: VoxelBuffer<u32>,
}

impl EncodedVoxels {
    /// Create a label field with every voxel unvisited
    ///
    /// # Errors
    ///
    /// Returns `RegionError::InvalidParameters` if the grid has more voxels
    /// than there are encodable component identifiers.
    pub fn new(extent: Extent) -> RegionResult<Self> {
        if extent.volume() as u64 > MAX_COMPONENT_ID as u64 + 1 {
            return Err(RegionError::InvalidParameters(format!(
                "{} voxels exceed the {} encodable component identifiers",
                extent.volume(),
                MAX_COMPONENT_ID as u64 + 1
            )));
        }
        Ok(Self {
            codes: VoxelBuffer::new_with_value(extent, UNVISITED),
        })
    }

    /// Get the grid extent
    #[inline]
    pub fn extent(&self) -> Extent {
        self.codes.extent()
    }

    /// Decoded state at a raster offset
    #[inline]
    pub fn code(&self, index: usize) -> VoxelCode {
        VoxelCode::decode(self.codes.value(index))
    }

    /// Decoded state at a point
    ///
    /// # Errors
    ///
    /// Returns an error if the point is outside the grid.
    pub fn code_at(&self, p: Point3i) -> RegionResult<VoxelCode> {
        Ok(VoxelCode::decode(self.codes.get(p)?))
    }

    /// Raw code at a raster offset
    #[inline]
    pub fn raw(&self, index: usize) -> u32 {
        self.codes.value(index)
    }

    /// Store a state at a raster offset
    #[inline]
    pub fn set(&mut self, index: usize, code: VoxelCode) {
        self.codes.set_value(index, code.encode());
    }

    /// Count voxels whose raw code satisfies `pred`
    pub fn count_raw(&self, pred: impl Fn(u32) -> bool) -> usize {
        self.codes.data().iter().filter(|&&c| pred(c)).count()
    }

    /// Access the raw codes
    pub fn raw_codes(&self) -> &VoxelBuffer<u32> {
        &self.codes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_bijection() {
        let mut seen = std::collections::HashSet::new();
        for dz in -1..=1 {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let code = encode_direction(dx, dy, dz);
                    assert!(is_direction_code(code));
                    assert!(!is_component_id(code));
                    assert_eq!(decode_direction(code), (dx, dy, dz));
                    assert!(seen.insert(code));
                }
            }
        }
        assert_eq!(seen.len(), NUM_DIRECTIONS as usize);
        assert_eq!(*seen.iter().max().unwrap() + 1, COMPONENT_BASE);
    }

    #[test]
    fn test_status_codes_are_disjoint() {
        for code in [UNVISITED, TEMPORARY, MINIMA, PLATEAU] {
            assert!(!is_direction_code(code));
            assert!(!is_component_id(code));
        }
        assert!(is_unvisited(UNVISITED));
        assert!(is_temporary(TEMPORARY));
        assert!(is_minima(MINIMA));
        assert!(is_plateau(PLATEAU));
        assert!(is_component_id(COMPONENT_BASE));
    }

    #[test]
    fn test_voxel_code_decode() {
        let dir = ChainCode::new(1, 0, -1).unwrap();
        let raw = VoxelCode::Direction(dir).encode();
        assert_eq!(VoxelCode::decode(raw), VoxelCode::Direction(dir));
        assert_eq!(VoxelCode::decode(COMPONENT_BASE + 17), VoxelCode::Component(17));
        assert_eq!(VoxelCode::decode(MINIMA), VoxelCode::Minima);
        assert_eq!(VoxelCode::Temporary.encode(), TEMPORARY);
    }

    #[test]
    fn test_chain_code() {
        assert!(ChainCode::new(2, 0, 0).is_none());
        let c = ChainCode::from_offset(Point3i::new(-1, 1, 0)).unwrap();
        assert_eq!(c.reversed().offset(), Point3i::new(1, -1, 0));
    }

    #[test]
    fn test_encoded_voxels() {
        let e = Extent::new(3, 3, 1).unwrap();
        let mut labels = EncodedVoxels::new(e).unwrap();
        assert_eq!(labels.count_raw(is_unvisited), 9);
        labels.set(4, VoxelCode::Component(4));
        assert_eq!(labels.code(4), VoxelCode::Component(4));
        assert_eq!(labels.code_at(Point3i::new(1, 1, 0)).unwrap(), VoxelCode::Component(4));
        assert!(labels.code_at(Point3i::new(3, 0, 0)).is_err());
        assert_eq!(labels.raw(4), COMPONENT_BASE + 4);
    }
}
