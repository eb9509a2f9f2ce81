//! Manifest describing the layout of the written assets.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::AssetError;
use crate::transform::{TRANSFORM_DESCRIPTION, TRANSFORM_UNITS};

/// Top-level manifest document (`manifest.json`)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub counts: ManifestCounts,
    pub schema: AssetSchema,
    pub coord_system: CoordSystem,
}

/// Element counts.
///
/// `jumps` is the number of jumps loaded from the source, before endpoint
/// validation. The number actually present in `jumps.bin` is the file length
/// divided by 8.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestCounts {
    pub systems: usize,
    pub jumps: usize,
}

/// Per-file element layout
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSchema {
    #[serde(rename = "systems_positions.bin")]
    pub positions: FileLayout,
    #[serde(rename = "systems_ids.bin")]
    pub ids: FileLayout,
    #[serde(rename = "systems_names.json")]
    pub names: FileLayout,
    #[serde(rename = "jumps.bin")]
    pub jumps: FileLayout,
}

impl Default for AssetSchema {
    fn default() -> Self {
        Self {
            positions: FileLayout::new("Float32Array").with_components(3),
            ids: FileLayout::new("Uint32Array"),
            names: FileLayout::new("MapIdToName"),
            jumps: FileLayout::new("Uint32Array")
                .with_components(2)
                .with_meaning("pairs of system IDs [a,b]"),
        }
    }
}

/// Layout of a single file
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileLayout {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
}

impl FileLayout {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            components: None,
            meaning: None,
        }
    }

    pub fn with_components(mut self, components: u32) -> Self {
        self.components = Some(components);
        self
    }

    pub fn with_meaning(mut self, meaning: impl Into<String>) -> Self {
        self.meaning = Some(meaning.into());
        self
    }
}

/// Units and transform applied to positions
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordSystem {
    pub units: String,
    pub transform: String,
}

impl Default for CoordSystem {
    fn default() -> Self {
        Self {
            units: TRANSFORM_UNITS.to_string(),
            transform: TRANSFORM_DESCRIPTION.to_string(),
        }
    }
}

impl Manifest {
    /// Manifest for `systems` surviving systems and `loaded_jumps` source jumps.
    pub fn new(systems: usize, loaded_jumps: usize) -> Self {
        Self {
            counts: ManifestCounts {
                systems,
                jumps: loaded_jumps,
            },
            schema: AssetSchema::default(),
            coord_system: CoordSystem::default(),
        }
    }

    pub fn to_json(&self) -> Result<String, AssetError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), AssetError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| AssetError::io(path, e))
    }

    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let json = std::fs::read_to_string(path).map_err(|e| AssetError::io(path, e))?;
        Ok(serde_json::from_str(&json)?)
    }
}
