//! Client asset bundle: flat little-endian arrays, a name map and a manifest.
//!
//! | File                    | Element | Arity | Content                     |
//! |-------------------------|---------|-------|-----------------------------|
//! | `systems_positions.bin` | f32 LE  | 3     | transformed position (LY)   |
//! | `systems_ids.bin`       | u32 LE  | 1     | system id, parallel index   |
//! | `systems_names.json`    | JSON    | -     | `"<id>": "<name>"`          |
//! | `jumps.bin`             | u32 LE  | 2     | source, target              |
//! | `manifest.json`         | JSON    | -     | counts, layout, coordinates |

use std::io;
use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::ser::Formatter;
use tracing::{info, warn};

use crate::constants::{IDS_FILE, JUMPS_FILE, MANIFEST_FILE, NAMES_FILE, POSITIONS_FILE};
use crate::error::AssetError;
use crate::filter::JumpValidation;
use crate::manifest::Manifest;
use crate::model::TransformedSystem;

/// Id-to-name mapping, serialized as a JSON object in insertion order.
pub type NameMap = IndexMap<String, String>;

/// Single-line JSON with `", "` and `": "` separators, the layout the
/// viewer's name files have always had.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

/// Encode a name map for `systems_names.json`. Non-ASCII is written verbatim.
pub fn encode_names(names: &NameMap) -> Result<Vec<u8>, AssetError> {
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, SpacedFormatter);
    names.serialize(&mut serializer)?;
    Ok(out)
}

/// Everything written for the client.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetBundle {
    pub ids: Vec<u32>,
    pub positions: Vec<f32>,
    pub names: NameMap,
    pub jumps: Vec<u32>,
    pub manifest: Manifest,
}

fn to_u32(id: i64) -> Result<u32, AssetError> {
    u32::try_from(id).map_err(|_| AssetError::IdOutOfRange { id })
}

impl AssetBundle {
    /// Lay out surviving systems and validated jumps.
    ///
    /// `loaded_jumps` is the pre-validation jump count reported in the manifest.
    pub fn build(
        systems: &[TransformedSystem],
        jumps: &JumpValidation,
        loaded_jumps: usize,
    ) -> Result<Self, AssetError> {
        let mut ids = Vec::with_capacity(systems.len());
        let mut positions = Vec::with_capacity(systems.len() * 3);
        let mut names = NameMap::new();

        for system in systems {
            ids.push(to_u32(system.id)?);
            positions.extend(system.position.iter().map(|&c| c as f32));
            if names.insert(system.id.to_string(), system.name.clone()).is_some() {
                warn!(id = system.id, "duplicate system id; name map keeps the last name");
            }
        }

        let jumps = jumps
            .flat
            .iter()
            .map(|&id| to_u32(id))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            manifest: Manifest::new(ids.len(), loaded_jumps),
            ids,
            positions,
            names,
            jumps,
        })
    }

    /// Number of jump pairs in `jumps.bin`
    pub fn jump_pairs(&self) -> usize {
        self.jumps.len() / 2
    }

    /// Write all five files into `dir`, creating it if needed.
    pub fn write_to(&self, dir: &Path) -> Result<(), AssetError> {
        std::fs::create_dir_all(dir).map_err(|e| AssetError::io(dir, e))?;

        write_file(&dir.join(POSITIONS_FILE), &encode_f32s(&self.positions))?;
        write_file(&dir.join(IDS_FILE), &encode_u32s(&self.ids))?;
        write_file(&dir.join(NAMES_FILE), &encode_names(&self.names)?)?;
        write_file(&dir.join(JUMPS_FILE), &encode_u32s(&self.jumps))?;
        self.manifest.save(&dir.join(MANIFEST_FILE))?;

        info!(
            dir = %dir.display(),
            systems = self.ids.len(),
            jump_pairs = self.jump_pairs(),
            "wrote assets"
        );
        Ok(())
    }

    /// Read a bundle previously written by [`AssetBundle::write_to`].
    pub fn read_from(dir: &Path) -> Result<Self, AssetError> {
        let positions = decode_f32s(POSITIONS_FILE, &read_file(&dir.join(POSITIONS_FILE))?)?;
        let ids = decode_u32s(IDS_FILE, &read_file(&dir.join(IDS_FILE))?)?;
        let names: NameMap = serde_json::from_slice(&read_file(&dir.join(NAMES_FILE))?)?;
        let jumps = decode_u32s(JUMPS_FILE, &read_file(&dir.join(JUMPS_FILE))?)?;
        let manifest = Manifest::load(&dir.join(MANIFEST_FILE))?;

        if positions.len() != ids.len() * 3 {
            return Err(AssetError::Corrupt {
                file: POSITIONS_FILE.to_string(),
                reason: format!(
                    "{} floats for {} ids, expected {}",
                    positions.len(),
                    ids.len(),
                    ids.len() * 3
                ),
            });
        }
        if jumps.len() % 2 != 0 {
            return Err(AssetError::Corrupt {
                file: JUMPS_FILE.to_string(),
                reason: format!("odd number of endpoints ({})", jumps.len()),
            });
        }

        Ok(Self {
            ids,
            positions,
            names,
            jumps,
            manifest,
        })
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), AssetError> {
    std::fs::write(path, bytes).map_err(|e| AssetError::io(path, e))
}

fn read_file(path: &Path) -> Result<Vec<u8>, AssetError> {
    std::fs::read(path).map_err(|e| AssetError::io(path, e))
}

/// Little-endian bytes of `values`
pub fn encode_u32s(values: &[u32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Little-endian bytes of `values`
pub fn encode_f32s(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn check_word_aligned(file: &str, bytes: &[u8]) -> Result<(), AssetError> {
    if bytes.len() % 4 != 0 {
        return Err(AssetError::Corrupt {
            file: file.to_string(),
            reason: format!("length {} is not a multiple of 4", bytes.len()),
        });
    }
    Ok(())
}

fn decode_u32s(file: &str, bytes: &[u8]) -> Result<Vec<u32>, AssetError> {
    check_word_aligned(file, bytes)?;
    Ok(bytes
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

fn decode_f32s(file: &str, bytes: &[u8]) -> Result<Vec<f32>, AssetError> {
    check_word_aligned(file, bytes)?;
    Ok(bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}
