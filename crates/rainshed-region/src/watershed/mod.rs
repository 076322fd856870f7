//! Seeded rainfall watershed segmentation
//!
//! The rainfall watershed treats the intensity field as a landscape and lets
//! each voxel drain along its steepest descent. All voxels that drain to the
//! same local minimum, or into the same seed, form one catchment basin.
//!
//! A run proceeds in four steps:
//!
//! 1. Seeds are written into the label field as resolved components.
//! 2. A single raster-order pass gives every remaining voxel a direction, a
//!    minimum marker, or resolves the plateau it belongs to.
//! 3. Direction chains are followed to their terminal component.
//! 4. One object mask is extracted per component.
//!
//! Diagnostic mode (`exit_with_minima`) stops after step 2 and returns the
//! minima that were found instead.

pub mod encoding;
pub mod extract;
pub mod finalize;
pub mod minima;
pub mod plateau;
pub mod seeds;
pub mod steepest;

pub use encoding::{ChainCode, EncodedVoxels, VoxelCode};
pub use extract::BoundingBoxMap;
pub use minima::MinimaStore;
pub use plateau::PlateauShape;
pub use steepest::{Descent, SteepestCalc};

use crate::conncomp::{Connectivity, Neighborhood};
use crate::error::{RegionError, RegionResult};
use rainshed_core::{BoundingBox, ObjectCollection, ObjectMask, Sample, VoxelBuffer};

/// Options for rainfall watershed segmentation
#[derive(Debug, Clone, PartialEq)]
pub struct WatershedOptions {
    /// Whether neighbours in adjacent slices are considered
    ///
    /// Ignored for single-slice fields.
    pub do_3d: bool,
    /// Adjacency between voxels
    pub connectivity: Connectivity,
    /// Stop after the main pass and return the minima found
    pub exit_with_minima: bool,
    /// Restrict segmentation to the voxels of this mask
    pub containing_mask: Option<ObjectMask>,
}

impl Default for WatershedOptions {
    fn default() -> Self {
        Self {
            do_3d: true,
            connectivity: Connectivity::Full,
            exit_with_minima: false,
            containing_mask: None,
        }
    }
}

impl WatershedOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether neighbours in adjacent slices are considered
    pub fn with_do_3d(mut self, do_3d: bool) -> Self {
        self.do_3d = do_3d;
        self
    }

    /// Set connectivity type
    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Set diagnostic minima mode
    pub fn with_exit_with_minima(mut self, exit_with_minima: bool) -> Self {
        self.exit_with_minima = exit_with_minima;
        self
    }

    /// Restrict segmentation to a mask
    pub fn with_containing_mask(mut self, mask: ObjectMask) -> Self {
        self.containing_mask = Some(mask);
        self
    }
}

/// Counters gathered during a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatershedStats {
    /// Voxels written by seed imposition
    pub seed_voxels: usize,
    /// Single-voxel minima found by the main pass
    pub point_minima: usize,
    /// Plateaus resolved by the main pass
    pub plateaus: usize,
    /// Plateaus that were regional minima
    pub plateau_minima: usize,
    /// Objects extracted
    pub objects: usize,
}

/// One segmentation run over an intensity field
///
/// The steps must be called in order: [`impose_seeds`](Self::impose_seeds)
/// (optional), [`main_pass`](Self::main_pass), then either
/// [`finalize`](Self::finalize) or [`into_minima`](Self::into_minima).
/// The free functions of this module drive a complete run.
#[derive(Debug)]
pub struct RainfallWatershed<'a, T> {
    field: &'a VoxelBuffer<T>,
    mask: Option<&'a ObjectMask>,
    neighborhood: Neighborhood,
    labels: EncodedVoxels,
    minima: Option<MinimaStore>,
    stats: WatershedStats,
}

impl<'a, T: Sample> RainfallWatershed<'a, T> {
    /// Prepare a run
    ///
    /// # Errors
    ///
    /// Returns `RegionError::InvalidParameters` if the containing mask does
    /// not lie inside the field, or if the field has more voxels than can
    /// be given component identifiers.
    pub fn new(field: &'a VoxelBuffer<T>, options: &'a WatershedOptions) -> RegionResult<Self> {
        let extent = field.extent();
        let mask = options.containing_mask.as_ref();

        if let Some(m) = mask {
            if !BoundingBox::from_extent(extent).contains_box(&m.bounding_box()) {
                return Err(RegionError::InvalidParameters(format!(
                    "containing mask {:?} exceeds the field",
                    m.bounding_box()
                )));
            }
        }

        let do_3d = options.do_3d && extent.z() > 1;
        Ok(Self {
            field,
            mask,
            neighborhood: Neighborhood::new(options.connectivity, do_3d),
            labels: EncodedVoxels::new(extent)?,
            minima: options.exit_with_minima.then(MinimaStore::new),
            stats: WatershedStats::default(),
        })
    }

    /// Write the seeds into the label field
    ///
    /// # Errors
    ///
    /// See [`seeds::impose_seeds`].
    pub fn impose_seeds(&mut self, seeds: &ObjectCollection) -> RegionResult<()> {
        self.stats.seed_voxels += seeds::impose_seeds(
            seeds,
            &mut self.labels,
            &self.neighborhood,
            self.mask,
            self.minima.as_mut(),
        )?;
        Ok(())
    }

    /// Visit every unlabelled voxel in raster order
    ///
    /// Afterwards every voxel of the region holds a direction, a minimum
    /// marker or a component identifier.
    ///
    /// # Errors
    ///
    /// Returns `RegionError::InvariantViolation` if plateau resolution
    /// fails or leaves temporary voxels behind.
    pub fn main_pass(&mut self) -> RegionResult<()> {
        let extent = self.field.extent();
        let calc = SteepestCalc::new(self.field, &self.neighborhood, self.mask);

        for index in 0..extent.volume() {
            if self.labels.code(index) != VoxelCode::Unvisited {
                continue;
            }
            let p = extent.point(index);
            if !calc.in_region(p) {
                continue;
            }

            match calc.calc(&self.labels, p, self.field.value(index)) {
                Descent::Direction(code) => self.labels.set(index, VoxelCode::Direction(code)),
                Descent::Minima => {
                    self.labels.set(index, VoxelCode::Minima);
                    self.stats.point_minima += 1;
                    if let Some(store) = self.minima.as_mut() {
                        store.add_point(p);
                    }
                }
                Descent::Plateau => {
                    let found = plateau::find_equal_voxels(&calc, &mut self.labels, p);
                    let shape = plateau::make_lower_complete(
                        &found,
                        &calc,
                        &mut self.labels,
                        self.minima.as_mut(),
                    )?;
                    self.stats.plateaus += 1;
                    if shape == PlateauShape::InnerOnly {
                        self.stats.plateau_minima += 1;
                    }
                }
            }
        }

        let leftover = self.labels.count_raw(encoding::is_temporary);
        if leftover > 0 {
            return Err(RegionError::InvariantViolation(format!(
                "{} temporary voxels remain after the main pass",
                leftover
            )));
        }

        log::debug!(
            "main pass: {} point minima, {} plateaus ({} minima)",
            self.stats.point_minima,
            self.stats.plateaus,
            self.stats.plateau_minima
        );
        Ok(())
    }

    /// Resolve every chain into a component and map the components
    ///
    /// # Errors
    ///
    /// See [`finalize::convert_all_to_components`].
    pub fn finalize(&mut self) -> RegionResult<BoundingBoxMap> {
        finalize::convert_all_to_components(&mut self.labels, self.mask)?;
        let map = extract::build_bounding_box_map(&self.labels);
        self.stats.objects = map.len();
        log::debug!("finalized {} components", map.len());
        Ok(map)
    }

    /// Current label field
    pub fn labels(&self) -> &EncodedVoxels {
        &self.labels
    }

    /// Counters gathered so far
    pub fn stats(&self) -> WatershedStats {
        self.stats
    }

    /// Take the label field
    pub fn into_labels(self) -> EncodedVoxels {
        self.labels
    }

    /// Take the collected minima as objects
    ///
    /// # Errors
    ///
    /// Returns `RegionError::InvalidParameters` if the run was not created
    /// in minima mode.
    pub fn into_minima(self) -> RegionResult<ObjectCollection> {
        let store = self.minima.ok_or_else(|| {
            RegionError::InvalidParameters("minima were not collected".to_string())
        })?;
        log::debug!("collected {} minima", store.len());
        store.into_objects()
    }
}

/// Segment an intensity field into catchment basins
///
/// # Arguments
///
/// * `field` - Intensity field
/// * `seeds` - Pre-labelled connected regions (may be empty)
/// * `options` - Segmentation options
///
/// # Returns
///
/// One object per basin, ordered by the raster position of the first voxel
/// of each basin. In minima mode, one object per minimum instead, in
/// discovery order with the seeds first.
///
/// # Errors
///
/// Returns an error if a seed is invalid, the containing mask does not fit
/// the field, or an internal invariant is broken.
///
/// # Examples
///
/// ```
/// use rainshed_core::{Extent, ObjectCollection, VoxelBuffer};
/// use rainshed_region::{WatershedOptions, rainfall_watershed};
///
/// // A single bowl with its bottom at the centre
/// let extent = Extent::new(5, 5, 1).unwrap();
/// let data = extent
///     .points()
///     .map(|p| ((p.x - 2).abs() + (p.y - 2).abs()) as u8)
///     .collect();
/// let field = VoxelBuffer::from_data(extent, data).unwrap();
///
/// let objects =
///     rainfall_watershed(&field, &ObjectCollection::new(), &WatershedOptions::new()).unwrap();
/// assert_eq!(objects.len(), 1);
/// assert_eq!(objects.get(0).unwrap().num_voxels(), 25);
/// ```
pub fn rainfall_watershed<T: Sample>(
    field: &VoxelBuffer<T>,
    seeds: &ObjectCollection,
    options: &WatershedOptions,
) -> RegionResult<ObjectCollection> {
    let mut run = RainfallWatershed::new(field, options)?;
    run.impose_seeds(seeds)?;
    run.main_pass()?;

    if options.exit_with_minima {
        return run.into_minima();
    }

    let map = run.finalize()?;
    let objects = extract::extract_objects(run.labels(), &map)?;
    log::debug!("rainfall watershed: {:?}", run.stats());
    Ok(objects)
}

/// Segment an intensity field and return a dense label grid
///
/// Basin `k` of [`rainfall_watershed`] receives label `k + 1`; voxels
/// outside the containing mask receive 0.
///
/// # Errors
///
/// Returns `RegionError::InvalidParameters` in minima mode, and otherwise
/// the errors of [`rainfall_watershed`].
pub fn rainfall_watershed_labels<T: Sample>(
    field: &VoxelBuffer<T>,
    seeds: &ObjectCollection,
    options: &WatershedOptions,
) -> RegionResult<VoxelBuffer<u32>> {
    if options.exit_with_minima {
        return Err(RegionError::InvalidParameters(
            "a label grid cannot be produced in minima mode".to_string(),
        ));
    }

    let mut run = RainfallWatershed::new(field, options)?;
    run.impose_seeds(seeds)?;
    run.main_pass()?;
    let map = run.finalize()?;
    Ok(extract::dense_labels(run.labels(), &map))
}

/// List the local minima of an intensity field
///
/// Equivalent to [`rainfall_watershed`] with `exit_with_minima` set. Each
/// seed is reported as a minimum ahead of those found by the main pass.
///
/// # Examples
///
/// ```
/// use rainshed_core::{Extent, ObjectCollection, VoxelBuffer};
/// use rainshed_region::{WatershedOptions, find_minima};
///
/// let extent = Extent::new(5, 1, 1).unwrap();
/// let field = VoxelBuffer::from_data(extent, vec![0u8, 3, 5, 3, 1]).unwrap();
/// let minima = find_minima(&field, &ObjectCollection::new(), &WatershedOptions::new()).unwrap();
/// assert_eq!(minima.len(), 2);
/// ```
pub fn find_minima<T: Sample>(
    field: &VoxelBuffer<T>,
    seeds: &ObjectCollection,
    options: &WatershedOptions,
) -> RegionResult<ObjectCollection> {
    let options = options.clone().with_exit_with_minima(true);
    rainfall_watershed(field, seeds, &options)
}

/// Run seed imposition and the main pass only
///
/// The returned label field holds the direction of every voxel before
/// chains are resolved, which exposes the descent itself.
///
/// # Errors
///
/// Same as [`rainfall_watershed`].
pub fn compute_descent<T: Sample>(
    field: &VoxelBuffer<T>,
    seeds: &ObjectCollection,
    options: &WatershedOptions,
) -> RegionResult<EncodedVoxels> {
    let mut run = RainfallWatershed::new(field, options)?;
    run.impose_seeds(seeds)?;
    run.main_pass()?;
    Ok(run.into_labels())
}

/// Rainfall watershed descending a second, guiding field
///
/// Not supported: fails after checking that both fields share an extent.
///
/// # Errors
///
/// Returns `RegionError::ExtentMismatch` if the fields differ in size and
/// `RegionError::NotSupported` otherwise.
pub fn rainfall_watershed_guided<T: Sample, G: Sample>(
    field: &VoxelBuffer<T>,
    guide: &VoxelBuffer<G>,
    _seeds: &ObjectCollection,
    _options: &WatershedOptions,
) -> RegionResult<ObjectCollection> {
    if field.extent() != guide.extent() {
        return Err(RegionError::ExtentMismatch {
            expected: field.extent().dimensions(),
            actual: guide.extent().dimensions(),
        });
    }
    Err(RegionError::NotSupported(
        "rainfall watershed guided by a second field".to_string(),
    ))
}
