//! Meters to light-years, then Rx(-90°).

use crate::constants::METERS_PER_LY;
use crate::model::{System, TransformedSystem};

/// Human-readable description of [`transform_xyz`], recorded in the manifest
pub const TRANSFORM_DESCRIPTION: &str = "Rx(-90deg), i.e., (x,y,z)->(x,z,-y)";

/// Units of transformed positions, recorded in the manifest
pub const TRANSFORM_UNITS: &str = "lightyears";

/// Convert a position in meters to light-years and rotate it -90° about x.
///
/// `(x, y, z) -> (x, z, -y)`
///
/// # Examples
/// ```
/// use starmap_core::{transform_xyz, METERS_PER_LY};
/// let (x, y, z) = transform_xyz(METERS_PER_LY, 2.0 * METERS_PER_LY, 0.0);
/// assert_eq!((x, y, z), (1.0, 0.0, -2.0));
/// ```
pub fn transform_xyz(xm: f64, ym: f64, zm: f64) -> (f64, f64, f64) {
    let xly = xm / METERS_PER_LY;
    let yly = ym / METERS_PER_LY;
    let zly = zm / METERS_PER_LY;
    (xly, zly, -yly)
}

impl From<System> for TransformedSystem {
    fn from(system: System) -> Self {
        let (x, y, z) = transform_xyz(system.x, system.y, system.z);
        Self {
            id: system.id,
            name: system.name,
            position: [x, y, z],
        }
    }
}

/// Transform every system, keeping load order.
pub fn transform_systems(systems: Vec<System>) -> Vec<TransformedSystem> {
    systems.into_iter().map(TransformedSystem::from).collect()
}
