//! Records flowing through the pipeline.

use serde::{Deserialize, Serialize};

/// A star system as loaded from the source, coordinates in meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct System {
    pub id: i64,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl System {
    pub fn new(id: i64, name: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            id,
            name: name.into(),
            x,
            y,
            z,
        }
    }
}

/// A connection between two systems.
///
/// Endpoints are not guaranteed to reference a loaded system; see
/// [`crate::filter::validate_jumps`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Jump {
    pub source_id: i64,
    pub target_id: i64,
}

impl Jump {
    pub fn new(source_id: i64, target_id: i64) -> Self {
        Self {
            source_id,
            target_id,
        }
    }
}

/// A system after unit conversion and rotation. Position is in light-years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformedSystem {
    pub id: i64,
    pub name: String,
    pub position: [f64; 3],
}
