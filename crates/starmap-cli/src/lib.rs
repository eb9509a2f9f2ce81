//! starmap CLI library
//!
//! The `build` pipeline (resolve → load → filter/transform → write) and
//! its run summary, kept out of `main.rs` so integration tests can drive
//! it against fixture databases.

pub mod error;
pub mod pipeline;

pub use error::{BuildError, BuildResult};
pub use pipeline::{build_assets, run_build, BuildOptions, RunSummary};
