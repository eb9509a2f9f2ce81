//! starmap-core: turn simulation star systems and jumps into viewer assets.
//!
//! The crate is free of any database access. It holds the pure parts of
//! the pipeline:
//!
//! - **schema**: candidate rules that guess the systems/jumps tables and
//!   their columns from naming conventions
//! - **transform**: meters to light-years plus the fixed Rx(-90°) rotation
//! - **filter**: placeholder-name exclusion and jump validation
//! - **assets**: the flat binary arrays, name map and manifest written for
//!   the client
//!
//! # Coordinates
//!
//! Source positions are meters in the simulation frame. Output positions are
//! light-years with `(x, y, z) -> (x, z, -y)` applied, stored as
//! little-endian `f32`.

pub mod assets;
pub mod constants;
pub mod error;
pub mod filter;
pub mod manifest;
pub mod model;
pub mod schema;
pub mod transform;

pub use assets::*;
pub use constants::*;
pub use error::*;
pub use filter::*;
pub use manifest::*;
pub use model::*;
pub use schema::*;
pub use transform::*;
