//! Connected component and selection regression test
//!
//! Splits binary masks into components under every connectivity and checks
//! the component counts, then filters the watershed output of a noisy field
//! by size.
//!
//! Run with:
//! ```
//! cargo test -p rainshed-region --test conncomp_reg
//! ```

use rainshed_core::{Extent, ObjectCollection, ObjectMask, Point3i};
use rainshed_region::{
    Connectivity, Neighborhood, SizeThresholds, WatershedOptions, connected_components,
    is_connected, rainfall_watershed, select_by_size,
};
use rainshed_test::{RegParams, random_field};

/// Voxels of a 3D "staircase": each step touches the previous one only
/// along an edge or a corner, depending on `corner`
fn staircase(corner: bool) -> ObjectMask {
    let points: Vec<Point3i> = (0..4)
        .map(|i| {
            if corner {
                Point3i::new(i, i, i)
            } else {
                Point3i::new(i, i, 0)
            }
        })
        .collect();
    ObjectMask::from_points(&points).unwrap()
}

#[test]
fn conncomp_reg() {
    let mut rp = RegParams::new("conncomp");

    // Edge-adjacent steps
    let edge = staircase(false);
    let cases = [
        (Connectivity::Face, 4.0),
        (Connectivity::FaceEdge, 1.0),
        (Connectivity::Full, 1.0),
    ];
    for (connectivity, expected) in cases {
        let nb = Neighborhood::new(connectivity, true);
        let comps = connected_components(&edge, &nb).expect("connected_components failed");
        rp.compare_values(expected, comps.len() as f64, 0.0);
        rp.compare_values(4.0, comps.total_voxels() as f64, 0.0);
    }

    // Corner-adjacent steps need full 3D connectivity
    let corner = staircase(true);
    let cases = [
        (Connectivity::Face, 4.0),
        (Connectivity::FaceEdge, 4.0),
        (Connectivity::Full, 1.0),
    ];
    for (connectivity, expected) in cases {
        let nb = Neighborhood::new(connectivity, true);
        let comps = connected_components(&corner, &nb).expect("connected_components failed");
        rp.compare_values(expected, comps.len() as f64, 0.0);
    }
    let full_2d = Neighborhood::new(Connectivity::Full, false);
    rp.compare_values(0.0, is_connected(&corner, &full_2d) as u8 as f64, 0.0);

    // Components come out ordered by their first voxel
    let comps = connected_components(&corner, &Neighborhood::new(Connectivity::Face, true))
        .expect("connected_components failed");
    let firsts: Vec<Point3i> = comps.iter().filter_map(|c| c.first_point()).collect();
    let mut sorted = firsts.clone();
    sorted.sort_by_key(|p| (p.z, p.y, p.x));
    rp.compare_values(1.0, (firsts == sorted) as u8 as f64, 0.0);

    assert!(rp.cleanup(), "conncomp regression test failed");
}

#[test]
fn conncomp_reg_watershed_objects() {
    let mut rp = RegParams::new("conncomp_watershed_objects");
    let extent = Extent::new(16, 12, 2).unwrap();
    let field = random_field(extent, 99, 8).unwrap();

    let opts = WatershedOptions::new();
    let objects = rainfall_watershed(&field, &ObjectCollection::new(), &opts)
        .expect("rainfall_watershed failed");

    // Every basin is connected under the connectivity that produced it
    let nb = Neighborhood::new(opts.connectivity, true);
    let disconnected = objects.iter().filter(|o| !is_connected(o, &nb)).count();
    rp.compare_values(0.0, disconnected as f64, 0.0);

    // Selection keeps exactly the objects passing the threshold, in order
    let thresholds = SizeThresholds::new().with_min_voxels(5);
    let kept = select_by_size(&objects, &thresholds);
    let expected: Vec<usize> = objects
        .iter()
        .map(|o| o.num_voxels())
        .filter(|&n| n >= 5)
        .collect();
    let actual: Vec<usize> = kept.iter().map(|o| o.num_voxels()).collect();
    rp.compare_values(1.0, (expected == actual) as u8 as f64, 0.0);

    let everything = select_by_size(&objects, &SizeThresholds::new());
    rp.compare_values(objects.len() as f64, everything.len() as f64, 0.0);
    rp.compare_values(extent.volume() as f64, everything.total_voxels() as f64, 0.0);

    assert!(rp.cleanup(), "conncomp_watershed_objects regression test failed");
}
