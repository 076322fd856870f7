//! Rainshed - Seeded rainfall watershed segmentation for voxel grids
//!
//! # Overview
//!
//! Rainshed partitions a scalar 3D intensity field into catchment basins by
//! letting every voxel drain along its steepest descent. Caller-supplied
//! seed regions pull adjacent terrain into themselves, giving
//! marker-controlled segmentation.
//!
//! - Voxel grids, bounding boxes and object masks (re-exported at the root)
//! - Connected components, the watershed itself and size selection
//!   (under [`region`])
//!
//! # Example
//!
//! ```
//! use rainshed::{Extent, ObjectCollection, VoxelBuffer};
//! use rainshed::region::{WatershedOptions, rainfall_watershed};
//!
//! let extent = Extent::new(4, 4, 2).unwrap();
//! let field = VoxelBuffer::<u16>::new(extent);
//!
//! // A perfectly flat field is one regional minimum
//! let objects = rainfall_watershed(&field, &ObjectCollection::new(), &WatershedOptions::new())
//!     .unwrap();
//! assert_eq!(objects.len(), 1);
//! assert_eq!(objects.get(0).unwrap().num_voxels(), 32);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use rainshed_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use rainshed_region as region;
