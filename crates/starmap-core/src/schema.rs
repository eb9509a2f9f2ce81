//! Schema inference over unknown table and column names.
//!
//! Every guess is an ordered list of [`CandidateRule`]s. A rule is a pure
//! function from the available names to an optional pick; the first rule
//! that picks something wins. An operator override skips the list entirely.
//!
//! | Target        | Rules                                                          |
//! |---------------|----------------------------------------------------------------|
//! | systems table | name contains `system`, else first table                       |
//! | jumps table   | name contains `jump`/`gate`/`link`                             |
//! | id            | `id`, `system_id`, `solarsystemid`, `smart_object_id`, else first column |
//! | name          | `name`, `system_name`, `label`                                 |
//! | x / y / z     | `x`, `posx`, `position_x`, `world_x`, `centerx` (and y/z)      |
//! | jump source   | contains `from`+`id`, `a`+`id`, `source`                       |
//! | jump target   | contains `to`+`id`, `b`+`id`, `target`                         |

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SchemaError;

/// A single inference rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateRule {
    /// First name equal to the candidate, ignoring case
    Exact(&'static str),
    /// First name whose lowercased form contains any keyword
    ContainsAny(&'static [&'static str]),
    /// First name whose lowercased form contains every token
    ContainsAll(&'static [&'static str]),
    /// The first name, if any
    First,
}

impl CandidateRule {
    /// Apply the rule, returning the name in its original spelling.
    pub fn apply(&self, names: &[String]) -> Option<String> {
        let hit = match self {
            CandidateRule::Exact(candidate) => {
                names.iter().find(|n| n.to_lowercase() == *candidate)
            }
            CandidateRule::ContainsAny(keywords) => names.iter().find(|n| {
                let lower = n.to_lowercase();
                keywords.iter().any(|k| lower.contains(k))
            }),
            CandidateRule::ContainsAll(tokens) => names.iter().find(|n| {
                let lower = n.to_lowercase();
                tokens.iter().all(|t| lower.contains(t))
            }),
            CandidateRule::First => names.first(),
        };
        hit.cloned()
    }
}

/// Resolve a name: the override if present, else the first rule that hits.
pub fn resolve_name(
    override_name: Option<&str>,
    rules: &[CandidateRule],
    names: &[String],
) -> Option<String> {
    if let Some(name) = override_name {
        return Some(name.to_string());
    }
    rules.iter().find_map(|rule| rule.apply(names))
}

use CandidateRule::{ContainsAll, ContainsAny, Exact, First};

pub const SYSTEMS_TABLE_RULES: &[CandidateRule] = &[ContainsAny(&["system"]), First];
pub const JUMPS_TABLE_RULES: &[CandidateRule] = &[ContainsAny(&["jump", "gate", "link"])];

pub const SYSTEM_ID_RULES: &[CandidateRule] = &[
    Exact("id"),
    Exact("system_id"),
    Exact("solarsystemid"),
    Exact("smart_object_id"),
    First,
];
pub const SYSTEM_NAME_RULES: &[CandidateRule] =
    &[Exact("name"), Exact("system_name"), Exact("label")];
pub const SYSTEM_X_RULES: &[CandidateRule] = &[
    Exact("x"),
    Exact("posx"),
    Exact("position_x"),
    Exact("world_x"),
    Exact("centerx"),
];
pub const SYSTEM_Y_RULES: &[CandidateRule] = &[
    Exact("y"),
    Exact("posy"),
    Exact("position_y"),
    Exact("world_y"),
    Exact("centery"),
];
pub const SYSTEM_Z_RULES: &[CandidateRule] = &[
    Exact("z"),
    Exact("posz"),
    Exact("position_z"),
    Exact("world_z"),
    Exact("centerz"),
];

pub const JUMP_SOURCE_RULES: &[CandidateRule] = &[
    ContainsAll(&["from", "id"]),
    ContainsAll(&["a", "id"]),
    ContainsAll(&["source"]),
];
pub const JUMP_TARGET_RULES: &[CandidateRule] = &[
    ContainsAll(&["to", "id"]),
    ContainsAll(&["b", "id"]),
    ContainsAll(&["target"]),
];

/// Operator-supplied names that bypass inference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaOverrides {
    pub systems_table: Option<String>,
    pub sys_id_col: Option<String>,
    pub sys_name_col: Option<String>,
    pub sys_x_col: Option<String>,
    pub sys_y_col: Option<String>,
    pub sys_z_col: Option<String>,
    pub jumps_table: Option<String>,
    pub jump_from_col: Option<String>,
    pub jump_to_col: Option<String>,
}

/// Columns of the systems table. Absent columns default downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemColumns {
    pub id: String,
    pub name: Option<String>,
    pub x: Option<String>,
    pub y: Option<String>,
    pub z: Option<String>,
}

impl SystemColumns {
    /// The resolved columns in projection order: id, then name/x/y/z when present.
    pub fn projection(&self) -> Vec<&str> {
        let mut cols = vec![self.id.as_str()];
        cols.extend(
            [&self.name, &self.x, &self.y, &self.z]
                .into_iter()
                .filter_map(|c| c.as_deref()),
        );
        cols
    }
}

/// Endpoint columns of the jumps table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JumpColumns {
    pub source: String,
    pub target: String,
}

/// The table pair chosen for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTables {
    pub systems: String,
    pub jumps: Option<String>,
}

/// Everything inference decided for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSchema {
    pub systems_table: String,
    pub system_columns: SystemColumns,
    pub jumps_table: Option<String>,
    pub jump_columns: Option<JumpColumns>,
}

/// Pick the systems and jumps tables from the enumerated table names.
pub fn resolve_tables(
    tables: &[String],
    overrides: &SchemaOverrides,
) -> Result<ResolvedTables, SchemaError> {
    let systems = resolve_name(overrides.systems_table.as_deref(), SYSTEMS_TABLE_RULES, tables)
        .ok_or(SchemaError::NoSystemsTable)?;
    let jumps = resolve_name(overrides.jumps_table.as_deref(), JUMPS_TABLE_RULES, tables);
    debug!(systems = %systems, jumps = ?jumps, "resolved tables");
    Ok(ResolvedTables { systems, jumps })
}

/// Pick id/name/x/y/z among the systems table's columns.
pub fn resolve_system_columns(
    table: &str,
    columns: &[String],
    overrides: &SchemaOverrides,
) -> Result<SystemColumns, SchemaError> {
    let id = resolve_name(overrides.sys_id_col.as_deref(), SYSTEM_ID_RULES, columns).ok_or_else(
        || SchemaError::NoColumns {
            table: table.to_string(),
        },
    )?;
    let resolved = SystemColumns {
        id,
        name: resolve_name(overrides.sys_name_col.as_deref(), SYSTEM_NAME_RULES, columns),
        x: resolve_name(overrides.sys_x_col.as_deref(), SYSTEM_X_RULES, columns),
        y: resolve_name(overrides.sys_y_col.as_deref(), SYSTEM_Y_RULES, columns),
        z: resolve_name(overrides.sys_z_col.as_deref(), SYSTEM_Z_RULES, columns),
    };
    debug!(table, columns = ?resolved, "resolved system columns");
    Ok(resolved)
}

/// Fail if any overridden column is missing from `columns`.
///
/// SQLite reads a quoted identifier that names no column as a string
/// literal, so a mistyped override has to be caught before querying.
pub fn check_column_overrides<'a>(
    table: &str,
    columns: &[String],
    requested: impl IntoIterator<Item = Option<&'a str>>,
) -> Result<(), SchemaError> {
    for column in requested.into_iter().flatten() {
        if !columns.iter().any(|c| c.eq_ignore_ascii_case(column)) {
            return Err(SchemaError::UnknownColumn {
                table: table.to_string(),
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

impl SchemaOverrides {
    /// Column overrides that apply to the systems table.
    pub fn system_column_overrides(&self) -> [Option<&str>; 5] {
        [
            self.sys_id_col.as_deref(),
            self.sys_name_col.as_deref(),
            self.sys_x_col.as_deref(),
            self.sys_y_col.as_deref(),
            self.sys_z_col.as_deref(),
        ]
    }

    /// Column overrides that apply to the jumps table.
    pub fn jump_column_overrides(&self) -> [Option<&str>; 2] {
        [self.jump_from_col.as_deref(), self.jump_to_col.as_deref()]
    }
}

/// Pick source/target among the jumps table's columns.
///
/// Returns `None` when either endpoint is unresolved; the run then has no jumps.
pub fn resolve_jump_columns(columns: &[String], overrides: &SchemaOverrides) -> Option<JumpColumns> {
    let source = resolve_name(overrides.jump_from_col.as_deref(), JUMP_SOURCE_RULES, columns);
    let target = resolve_name(overrides.jump_to_col.as_deref(), JUMP_TARGET_RULES, columns);
    debug!(source = ?source, target = ?target, "resolved jump columns");
    Some(JumpColumns {
        source: source?,
        target: target?,
    })
}
