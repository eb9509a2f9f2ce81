//! The build pipeline.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::info;

use starmap_core::{
    filter_systems, transform_systems, validate_jumps, AssetBundle, SchemaOverrides,
    DEFAULT_OUT_DIR,
};
use starmap_io::{load_records, open_source, resolve_schema, DataSource};

use crate::error::{BuildError, BuildResult};

/// Inputs of a build run besides the source itself.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub out_dir: PathBuf,
    pub overrides: SchemaOverrides,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            overrides: SchemaOverrides::default(),
        }
    }
}

/// Printed to stdout after a successful run.
///
/// `jumps_count` counts pairs actually written, unlike the manifest's
/// `counts.jumps` which counts every jump loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub systems_table: String,
    pub jumps_table: Option<String>,
    pub systems_count: usize,
    pub filtered_systems: usize,
    pub jumps_count: usize,
    pub filtered_jumps: usize,
    /// Jump rows without two integer endpoints
    pub skipped_jumps: usize,
    pub out: String,
}

impl RunSummary {
    pub fn to_json(&self) -> BuildResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Run the whole pipeline against an open source.
///
/// Nothing is written until every row has been loaded and laid out, so a
/// failed run leaves the output directory untouched.
pub fn build_assets<S: DataSource + ?Sized>(
    source: &S,
    options: &BuildOptions,
) -> BuildResult<RunSummary> {
    let schema = resolve_schema(source, &options.overrides)?;
    let records = load_records(source, &schema)?;
    let loaded_jumps = records.jumps.jumps.len();

    let filtered = filter_systems(records.systems);
    info!(
        kept = filtered.kept.len(),
        excluded = filtered.excluded,
        "filtered placeholder systems"
    );
    let systems = transform_systems(filtered.kept);

    let validation = validate_jumps(&records.jumps.jumps, &systems);
    info!(
        kept = validation.pair_count(),
        dropped = validation.dropped,
        "validated jumps"
    );

    let bundle = AssetBundle::build(&systems, &validation, loaded_jumps)?;
    bundle.write_to(&options.out_dir)?;

    let out = std::fs::canonicalize(&options.out_dir).map_err(|e| BuildError::OutputPath {
        path: options.out_dir.clone(),
        message: e.to_string(),
    })?;

    Ok(RunSummary {
        systems_table: schema.systems_table,
        jumps_table: schema.jumps_table,
        systems_count: bundle.ids.len(),
        filtered_systems: filtered.excluded,
        jumps_count: bundle.jump_pairs(),
        filtered_jumps: validation.dropped,
        skipped_jumps: records.jumps.skipped,
        out: out.display().to_string(),
    })
}

/// Open the database at `db` and run the pipeline.
pub fn run_build(db: &str, options: &BuildOptions) -> BuildResult<RunSummary> {
    let source = open_source(db)?;
    info!(db, format = source.format_name(), "opened source");
    build_assets(source.as_ref(), options)
}
