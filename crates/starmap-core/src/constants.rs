//! Process-wide constants shared by every stage.

/// Meters in one light-year (IAU definition)
pub const METERS_PER_LY: f64 = 9.4607304725808e15;

/// Placeholder system names: `V-` followed by exactly three digits.
/// One trailing newline is tolerated.
pub const V_SERIES_PATTERN: &str = r"(?i)^V-\d{3}\n?$";

/// Placeholder system names: `AD` followed by exactly three digits.
/// One trailing newline is tolerated.
pub const AD_SERIES_PATTERN: &str = r"(?i)^AD\d{3}\n?$";

/// Output file holding `f32` positions, three per system
pub const POSITIONS_FILE: &str = "systems_positions.bin";

/// Output file holding `u32` system ids
pub const IDS_FILE: &str = "systems_ids.bin";

/// Output file mapping id strings to names
pub const NAMES_FILE: &str = "systems_names.json";

/// Output file holding `u32` jump endpoint pairs
pub const JUMPS_FILE: &str = "jumps.bin";

/// Output file describing the layout of the others
pub const MANIFEST_FILE: &str = "manifest.json";

/// Default output directory for the `build` command
pub const DEFAULT_OUT_DIR: &str = "./public/data";
