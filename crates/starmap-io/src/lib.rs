//! starmap-io - read star systems and jumps from a relational source
//!
//! Table and column names are not known up front. The source exposes
//! introspection (`table_names`, `table_schema`) and a narrow projection
//! query; [`loader`] combines those with the inference rules from
//! `starmap-core` to produce typed records.
//!
//! # Design
//!
//! All sources implement the `DataSource` trait. SQLite is the only
//! backend; connections are opened read-only.

pub mod inspect;
pub mod loader;
pub mod query;
pub mod schema;
pub mod source;
pub mod sqlite_source;

pub use inspect::*;
pub use loader::*;
pub use query::*;
pub use schema::*;
pub use source::*;
pub use sqlite_source::SqliteSource;
