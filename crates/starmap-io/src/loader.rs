//! Resolve the schema of a source and load typed systems and jumps.

use starmap_core::{
    check_column_overrides, resolve_jump_columns, resolve_system_columns, resolve_tables, Jump, JumpColumns,
    ResolvedSchema, SchemaOverrides, System, SystemColumns,
};
use tracing::{info, warn};

use crate::query::Projection;
use crate::schema::Value;
use crate::source::{DataSource, SourceError, SourceResult};

/// Run table and column inference against `source`.
pub fn resolve_schema<S: DataSource + ?Sized>(
    source: &S,
    overrides: &SchemaOverrides,
) -> SourceResult<ResolvedSchema> {
    let tables = source.table_names()?;
    let resolved = resolve_tables(&tables, overrides)?;

    let system_cols = source.table_schema(&resolved.systems)?.column_names();
    check_column_overrides(
        &resolved.systems,
        &system_cols,
        overrides.system_column_overrides(),
    )?;
    let system_columns = resolve_system_columns(&resolved.systems, &system_cols, overrides)?;

    let jump_columns = match &resolved.jumps {
        Some(table) => {
            let cols = source.table_schema(table)?.column_names();
            check_column_overrides(table, &cols, overrides.jump_column_overrides())?;
            let columns = resolve_jump_columns(&cols, overrides);
            if columns.is_none() {
                warn!(table = %table, "could not resolve jump endpoints; skipping jumps");
            }
            columns
        }
        None => None,
    };

    let schema = ResolvedSchema {
        systems_table: resolved.systems,
        system_columns,
        jumps_table: resolved.jumps,
        jump_columns,
    };
    info!(
        systems_table = %schema.systems_table,
        jumps_table = ?schema.jumps_table,
        id = %schema.system_columns.id,
        name = ?schema.system_columns.name,
        x = ?schema.system_columns.x,
        y = ?schema.system_columns.y,
        z = ?schema.system_columns.z,
        jump_columns = ?schema.jump_columns,
        "resolved schema"
    );
    Ok(schema)
}

/// Load every row of the systems table.
///
/// Fails if any id is not an integer. Missing name columns fall back to the
/// id string, missing or null coordinates to `0.0`.
pub fn load_systems<S: DataSource + ?Sized>(
    source: &S,
    table: &str,
    columns: &SystemColumns,
) -> SourceResult<Vec<System>> {
    let projection = Projection::new(table, columns.projection());
    let rows = source.select(&projection)?;

    // Offsets of the optional columns within the projection
    let mut next = 1;
    let mut offset = |present: bool| {
        present.then(|| {
            let at = next;
            next += 1;
            at
        })
    };
    let name_at = offset(columns.name.is_some());
    let x_at = offset(columns.x.is_some());
    let y_at = offset(columns.y.is_some());
    let z_at = offset(columns.z.is_some());

    let coordinate = |row: &[Value], at: Option<usize>, column: &Option<String>| {
        match (at, column) {
            (Some(at), Some(column)) => coerce_coordinate(&row[at], table, column),
            _ => Ok(0.0),
        }
    };

    let mut systems = Vec::with_capacity(rows.len());
    for row in &rows {
        let row = row.as_slice();
        let id = row[0].as_i64().ok_or_else(|| SourceError::InvalidId {
            table: table.to_string(),
            column: columns.id.clone(),
            value: row[0].to_string(),
        })?;
        let name = name_at
            .and_then(|at| row[at].as_text())
            .unwrap_or_else(|| id.to_string());

        systems.push(System {
            id,
            name,
            x: coordinate(row, x_at, &columns.x)?,
            y: coordinate(row, y_at, &columns.y)?,
            z: coordinate(row, z_at, &columns.z)?,
        });
    }

    info!(table, count = systems.len(), "loaded systems");
    Ok(systems)
}

fn coerce_coordinate(value: &Value, table: &str, column: &str) -> SourceResult<f64> {
    if value.is_null() {
        return Ok(0.0);
    }
    value.as_f64().ok_or_else(|| SourceError::InvalidCoordinate {
        table: table.to_string(),
        column: column.to_string(),
        value: value.to_string(),
    })
}

/// Jumps read from the source plus rows that had no usable endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedJumps {
    pub jumps: Vec<Jump>,
    pub skipped: usize,
}

/// Load every row of the jumps table.
///
/// Rows with a null or non-integer endpoint are skipped, never fatal.
pub fn load_jumps<S: DataSource + ?Sized>(
    source: &S,
    table: &str,
    columns: &JumpColumns,
) -> SourceResult<LoadedJumps> {
    let projection = Projection::new(table, [columns.source.as_str(), columns.target.as_str()]);
    let rows = source.select(&projection)?;

    let mut loaded = LoadedJumps::default();
    for row in &rows {
        match (row[0].as_i64(), row[1].as_i64()) {
            (Some(source_id), Some(target_id)) => loaded.jumps.push(Jump::new(source_id, target_id)),
            _ => {
                if !row[0].is_null() && !row[1].is_null() {
                    warn!(source = %row[0], target = %row[1], "skipping jump with non-integer endpoint");
                }
                loaded.skipped += 1;
            }
        }
    }

    info!(table, count = loaded.jumps.len(), skipped = loaded.skipped, "loaded jumps");
    Ok(loaded)
}

/// Systems and jumps for a resolved schema.
#[derive(Debug, Clone, Default)]
pub struct LoadedRecords {
    pub systems: Vec<System>,
    pub jumps: LoadedJumps,
}

/// Load everything the resolved schema points at.
pub fn load_records<S: DataSource + ?Sized>(
    source: &S,
    schema: &ResolvedSchema,
) -> SourceResult<LoadedRecords> {
    let systems = load_systems(source, &schema.systems_table, &schema.system_columns)?;
    let jumps = match (&schema.jumps_table, &schema.jump_columns) {
        (Some(table), Some(columns)) => load_jumps(source, table, columns)?,
        _ => LoadedJumps::default(),
    };
    Ok(LoadedRecords { systems, jumps })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite_source::SqliteSource;
    use rusqlite::Connection;

    fn source(sql: &str) -> SqliteSource {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(sql).unwrap();
        SqliteSource::from_connection(conn)
    }

    #[test]
    fn loads_with_inferred_columns() {
        let src = source(
            "
            CREATE TABLE SolarSystems (solarSystemId INTEGER, name TEXT, centerX REAL, centerY REAL, centerZ REAL);
            INSERT INTO SolarSystems VALUES (30000001, 'Tanoo', 1.0, 2.0, 3.0);
            CREATE TABLE Jumps (fromSystemId INTEGER, toSystemId INTEGER);
            INSERT INTO Jumps VALUES (30000001, 30000002);
            ",
        );
        let schema = resolve_schema(&src, &SchemaOverrides::default()).unwrap();
        assert_eq!(schema.systems_table, "SolarSystems");
        assert_eq!(schema.jumps_table.as_deref(), Some("Jumps"));

        let records = load_records(&src, &schema).unwrap();
        assert_eq!(
            records.systems,
            vec![System::new(30000001, "Tanoo", 1.0, 2.0, 3.0)]
        );
        assert_eq!(records.jumps.jumps, vec![Jump::new(30000001, 30000002)]);
    }

    #[test]
    fn missing_columns_default() {
        let src = source(
            "
            CREATE TABLE systems (key INTEGER, posz REAL);
            INSERT INTO systems VALUES (7, 9.0);
            ",
        );
        let schema = resolve_schema(&src, &SchemaOverrides::default()).unwrap();
        assert_eq!(schema.system_columns.id, "key");
        assert_eq!(schema.jumps_table, None);

        let systems = load_systems(&src, &schema.systems_table, &schema.system_columns).unwrap();
        assert_eq!(systems, vec![System::new(7, "7", 0.0, 0.0, 9.0)]);
    }

    #[test]
    fn null_name_and_coordinates_default() {
        let src = source(
            "
            CREATE TABLE systems (id INTEGER, name TEXT, x REAL, y REAL, z REAL);
            INSERT INTO systems VALUES (5, NULL, NULL, 1.0, NULL);
            ",
        );
        let schema = resolve_schema(&src, &SchemaOverrides::default()).unwrap();
        let systems = load_systems(&src, &schema.systems_table, &schema.system_columns).unwrap();
        assert_eq!(systems, vec![System::new(5, "5", 0.0, 1.0, 0.0)]);
    }

    #[test]
    fn text_ids_and_coordinates_coerce() {
        let src = source(
            "
            CREATE TABLE systems (id TEXT, name TEXT, x TEXT, y TEXT, z TEXT);
            INSERT INTO systems VALUES ('12', 'Sol', '1e16', '0', '-2');
            ",
        );
        let schema = resolve_schema(&src, &SchemaOverrides::default()).unwrap();
        let systems = load_systems(&src, &schema.systems_table, &schema.system_columns).unwrap();
        assert_eq!(systems, vec![System::new(12, "Sol", 1e16, 0.0, -2.0)]);
    }

    #[test]
    fn non_integer_id_is_fatal() {
        let src = source(
            "
            CREATE TABLE systems (id TEXT, name TEXT);
            INSERT INTO systems VALUES ('1', 'ok'), ('J-abc', 'bad');
            ",
        );
        let schema = resolve_schema(&src, &SchemaOverrides::default()).unwrap();
        let err = load_systems(&src, &schema.systems_table, &schema.system_columns).unwrap_err();
        match err {
            SourceError::InvalidId { table, column, value } => {
                assert_eq!(table, "systems");
                assert_eq!(column, "id");
                assert_eq!(value, "'J-abc'");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn null_id_is_fatal() {
        let src = source(
            "
            CREATE TABLE systems (id INTEGER, name TEXT);
            INSERT INTO systems VALUES (NULL, 'ghost');
            ",
        );
        let schema = resolve_schema(&src, &SchemaOverrides::default()).unwrap();
        let err = load_systems(&src, &schema.systems_table, &schema.system_columns).unwrap_err();
        assert!(matches!(err, SourceError::InvalidId { .. }));
    }

    #[test]
    fn garbage_coordinate_is_fatal() {
        let src = source(
            "
            CREATE TABLE systems (id INTEGER, x TEXT);
            INSERT INTO systems VALUES (1, 'north');
            ",
        );
        let schema = resolve_schema(&src, &SchemaOverrides::default()).unwrap();
        let err = load_systems(&src, &schema.systems_table, &schema.system_columns).unwrap_err();
        assert!(matches!(err, SourceError::InvalidCoordinate { .. }));
    }

    #[test]
    fn null_jump_endpoints_are_skipped() {
        let src = source(
            "
            CREATE TABLE systems (id INTEGER);
            CREATE TABLE gates (source INTEGER, target INTEGER);
            INSERT INTO gates VALUES (1, 2), (NULL, 3), (4, NULL), (5, 6);
            ",
        );
        let schema = resolve_schema(&src, &SchemaOverrides::default()).unwrap();
        let records = load_records(&src, &schema).unwrap();
        assert_eq!(records.jumps.jumps, vec![Jump::new(1, 2), Jump::new(5, 6)]);
        assert_eq!(records.jumps.skipped, 2);
    }

    #[test]
    fn unresolvable_jump_columns_mean_no_jumps() {
        let src = source(
            "
            CREATE TABLE systems (id INTEGER);
            CREATE TABLE links (distance REAL);
            INSERT INTO links VALUES (1.0);
            ",
        );
        let schema = resolve_schema(&src, &SchemaOverrides::default()).unwrap();
        assert_eq!(schema.jumps_table.as_deref(), Some("links"));
        assert_eq!(schema.jump_columns, None);
        assert!(load_records(&src, &schema).unwrap().jumps.jumps.is_empty());
    }

    #[test]
    fn overrides_bypass_inference() {
        let src = source(
            "
            CREATE TABLE stars (sid INTEGER, label2 TEXT, a REAL, b REAL, c REAL);
            CREATE TABLE lanes (origin INTEGER, dest INTEGER);
            INSERT INTO stars VALUES (1, 'Sol', 1.0, 2.0, 3.0);
            INSERT INTO lanes VALUES (1, 1);
            ",
        );
        let overrides = SchemaOverrides {
            systems_table: Some("stars".into()),
            sys_id_col: Some("sid".into()),
            sys_name_col: Some("label2".into()),
            sys_x_col: Some("a".into()),
            sys_y_col: Some("b".into()),
            sys_z_col: Some("c".into()),
            jumps_table: Some("lanes".into()),
            jump_from_col: Some("origin".into()),
            jump_to_col: Some("dest".into()),
        };
        let schema = resolve_schema(&src, &overrides).unwrap();
        let records = load_records(&src, &schema).unwrap();
        assert_eq!(records.systems, vec![System::new(1, "Sol", 1.0, 2.0, 3.0)]);
        assert_eq!(records.jumps.jumps, vec![Jump::new(1, 1)]);
    }

    #[test]
    fn unknown_override_column_is_fatal() {
        let src = source(
            "
            CREATE TABLE systems (id INTEGER, name TEXT, x REAL, y REAL, z REAL);
            INSERT INTO systems VALUES (1, 'Sol', 0.0, 0.0, 0.0);
            ",
        );
        let overrides = SchemaOverrides {
            sys_name_col: Some("titel".into()),
            ..Default::default()
        };
        let err = resolve_schema(&src, &overrides).unwrap_err();
        match err {
            SourceError::Schema(starmap_core::SchemaError::UnknownColumn { table, column }) => {
                assert_eq!(table, "systems");
                assert_eq!(column, "titel");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn override_columns_match_ignoring_case() {
        let src = source(
            "
            CREATE TABLE systems (id INTEGER, posX REAL);
            INSERT INTO systems VALUES (1, 4.0);
            ",
        );
        let overrides = SchemaOverrides {
            sys_x_col: Some("POSX".into()),
            ..Default::default()
        };
        let schema = resolve_schema(&src, &overrides).unwrap();
        let systems = load_systems(&src, &schema.systems_table, &schema.system_columns).unwrap();
        assert_eq!(systems, vec![System::new(1, "1", 4.0, 0.0, 0.0)]);
    }

    #[test]
    fn unknown_jump_override_is_fatal() {
        let src = source(
            "
            CREATE TABLE systems (id INTEGER);
            CREATE TABLE jumps (from_id INTEGER, to_id INTEGER);
            ",
        );
        let overrides = SchemaOverrides {
            jump_from_col: Some("origin".into()),
            ..Default::default()
        };
        let err = resolve_schema(&src, &overrides).unwrap_err();
        assert!(matches!(
            err,
            SourceError::Schema(starmap_core::SchemaError::UnknownColumn { .. })
        ));
    }

    #[test]
    fn empty_database_is_fatal() {
        let src = source("");
        let err = resolve_schema(&src, &SchemaOverrides::default()).unwrap_err();
        assert!(matches!(
            err,
            SourceError::Schema(starmap_core::SchemaError::NoSystemsTable)
        ));
    }

    #[test]
    fn missing_override_table_has_no_columns() {
        let src = source("CREATE TABLE systems (id INTEGER);");
        let overrides = SchemaOverrides {
            systems_table: Some("Nope".into()),
            ..Default::default()
        };
        let err = resolve_schema(&src, &overrides).unwrap_err();
        assert!(matches!(
            err,
            SourceError::Schema(starmap_core::SchemaError::NoColumns { .. })
        ));
    }
}
