//! Shared fixtures for build integration tests

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use starmap_core::METERS_PER_LY;

/// Write a SQLite database at `dir/static.db` from a SQL script.
pub fn fixture_db(dir: &Path, sql: &str) -> PathBuf {
    let path = dir.join("static.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(sql).unwrap();
    path
}

/// The three-system scenario: Sol, a placeholder and Alpha one light-year out.
pub fn scenario_db(dir: &Path) -> PathBuf {
    let path = fixture_db(
        dir,
        "
        CREATE TABLE systems (id INTEGER, name TEXT, x REAL, y REAL, z REAL);
        CREATE TABLE jumps (from_id INTEGER, to_id INTEGER);
        INSERT INTO jumps VALUES (1, 2), (1, 3), (3, 99);
        ",
    );
    let conn = Connection::open(&path).unwrap();
    conn.execute(
        "INSERT INTO systems VALUES (1, 'Sol', 0, 0, 0), (2, 'V-001', 0, 0, 0), (3, 'Alpha', ?1, 0, 0)",
        [METERS_PER_LY],
    )
    .unwrap();
    path
}

/// A database shaped like the EVE Frontier static export.
pub fn eve_style_db(dir: &Path) -> PathBuf {
    fixture_db(
        dir,
        "
        CREATE TABLE Constellations (constellationId INTEGER, name TEXT);
        CREATE TABLE SolarSystems (
            solarSystemId INTEGER PRIMARY KEY,
            name TEXT,
            constellationId INTEGER,
            centerX REAL,
            centerY REAL,
            centerZ REAL
        );
        CREATE TABLE Jumps (fromSystemId INTEGER, toSystemId INTEGER);
        INSERT INTO Constellations VALUES (20000001, 'Alpha Cluster');
        INSERT INTO SolarSystems VALUES
            (30000001, 'A 2560', 20000001, -5.1e18, 2.3e17, 1.2e18),
            (30000002, 'M 974', 20000001, -5.2e18, 2.1e17, 1.1e18),
            (30000003, 'AD035', 20000001, 0, 0, 0),
            (30000004, 'U:3183', 20000001, -4.9e18, 2.8e17, 1.3e18),
            (30000005, 'Ærø', 20000001, -4.8e18, 2.9e17, 1.4e18);
        INSERT INTO Jumps VALUES
            (30000001, 30000002),
            (30000002, 30000001),
            (30000002, 30000003),
            (30000004, 30000001),
            (NULL, 30000001),
            (30000005, 30000004);
        ",
    )
}

pub fn read_u32s(path: &Path) -> Vec<u32> {
    std::fs::read(path)
        .unwrap()
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

pub fn read_f32s(path: &Path) -> Vec<f32> {
    std::fs::read(path)
        .unwrap()
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}
