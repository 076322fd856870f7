//! rainshed Core - Basic data structures for voxel segmentation
//!
//! This crate provides the fundamental data structures used throughout the
//! rainshed library:
//!
//! - [`Point3i`] - Integer voxel coordinates and offsets
//! - [`Extent`] - Grid size and raster-order indexing
//! - [`BoundingBox`] - Inclusive axis-aligned voxel regions
//! - [`VoxelBuffer`] - Dense 3D grid of scalar samples
//! - [`ObjectMask`] / [`ObjectCollection`] - Binary objects and lists of them

pub mod bbox;
pub mod error;
pub mod extent;
pub mod mask;
pub mod objects;
pub mod point;
pub mod voxels;

pub use bbox::BoundingBox;
pub use error::{Error, Result};
pub use extent::Extent;
pub use mask::ObjectMask;
pub use objects::ObjectCollection;
pub use point::Point3i;
pub use voxels::{Sample, VoxelBuffer};
