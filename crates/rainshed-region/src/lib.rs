//! rainshed-region - Region segmentation for rainshed
//!
//! This crate provides region processing on voxel grids:
//!
//! - **Connected component analysis** - Neighbourhoods and splitting masks
//!   into connected regions
//! - **Rainfall watershed** - Seeded steepest-descent segmentation into
//!   catchment basins
//! - **Selection** - Discarding objects below a size threshold
//!
//! # Examples
//!
//! ## Seeded segmentation
//!
//! ```
//! use rainshed_core::{Extent, ObjectCollection, ObjectMask, Point3i, VoxelBuffer};
//! use rainshed_region::{WatershedOptions, rainfall_watershed};
//!
//! // Two valleys separated by a ridge at x = 3
//! let extent = Extent::new(7, 1, 1).unwrap();
//! let field = VoxelBuffer::from_data(extent, vec![1u8, 2, 3, 9, 3, 2, 1]).unwrap();
//!
//! let seeds: ObjectCollection = vec![
//!     ObjectMask::from_points(&[Point3i::new(0, 0, 0)]).unwrap(),
//!     ObjectMask::from_points(&[Point3i::new(6, 0, 0)]).unwrap(),
//! ]
//! .into();
//!
//! let objects = rainfall_watershed(&field, &seeds, &WatershedOptions::new()).unwrap();
//! assert_eq!(objects.len(), 2);
//! assert_eq!(objects.total_voxels(), 7);
//! ```
//!
//! ## Connected components
//!
//! ```
//! use rainshed_core::{ObjectMask, Point3i};
//! use rainshed_region::{Connectivity, Neighborhood, connected_components};
//!
//! let mask = ObjectMask::from_points(&[
//!     Point3i::new(0, 0, 0),
//!     Point3i::new(1, 1, 0),
//! ])
//! .unwrap();
//!
//! let four = Neighborhood::new(Connectivity::Face, false);
//! assert_eq!(connected_components(&mask, &four).unwrap().len(), 2);
//! ```

pub mod conncomp;
pub mod error;
pub mod select;
pub mod watershed;

// Re-export core types
pub use rainshed_core;

// Re-export error types
pub use error::{RegionError, RegionResult};

// Re-export conncomp types and functions
pub use conncomp::{Connectivity, Neighborhood, connected_components, is_connected};

// Re-export select types and functions
pub use select::{SizeThresholds, select_by_size};

// Re-export watershed types and functions
pub use watershed::{
    RainfallWatershed, WatershedOptions, WatershedStats, compute_descent, find_minima,
    rainfall_watershed, rainfall_watershed_guided, rainfall_watershed_labels,
};
