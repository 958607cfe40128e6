//! SQLite database schema for gamerec

use rusqlite::{Connection, OptionalExtension, Result};

pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Result of schema creation
#[derive(Debug, PartialEq, Eq)]
pub enum SchemaCreateResult {
    /// Schema already at the current version, or freshly created
    Ok,
    /// An incompatible schema was dropped; every stage must be rebuilt
    Recreated,
}

const SCHEMA_SQL: &str = r#"
-- One row per item (or matrix row) per stage, in canonical order
CREATE TABLE IF NOT EXISTS stage_rows (
    stage TEXT NOT NULL,
    position INTEGER NOT NULL,
    item_id TEXT NOT NULL,
    payload TEXT NOT NULL,
    PRIMARY KEY (stage, position)
);
CREATE INDEX IF NOT EXISTS idx_stage_rows_item ON stage_rows(stage, item_id);

-- Bookkeeping for each written stage
CREATE TABLE IF NOT EXISTS stage_meta (
    stage TEXT PRIMARY KEY,
    rows INTEGER NOT NULL,
    written_at TEXT NOT NULL
);

-- Database metadata
CREATE TABLE IF NOT EXISTS db_meta (
    key TEXT PRIMARY KEY,
    value TEXT
);
"#;

fn drop_all_tables(conn: &Connection) -> Result<()> {
    conn.execute("DROP TABLE IF EXISTS stage_rows", [])?;
    conn.execute("DROP TABLE IF EXISTS stage_meta", [])?;
    conn.execute("DROP TABLE IF EXISTS db_meta", [])?;
    Ok(())
}

fn stored_version(conn: &Connection) -> Option<i32> {
    conn.query_row(
        "SELECT value FROM db_meta WHERE key = 'schema_version'",
        [],
        |r| r.get::<_, String>(0),
    )
    .optional()
    .ok()
    .flatten()
    .map(|s| s.parse().unwrap_or(0))
}

pub fn create_schema(conn: &Connection) -> Result<SchemaCreateResult> {
    let target_version = CURRENT_SCHEMA_VERSION;

    let result = match stored_version(conn) {
        Some(v) if v == target_version => SchemaCreateResult::Ok,
        None => {
            conn.execute_batch(SCHEMA_SQL)?;
            conn.execute(
                "INSERT INTO db_meta (key, value) VALUES ('schema_version', ?1)",
                [&target_version.to_string()],
            )?;
            SchemaCreateResult::Ok
        }
        Some(v) => {
            drop_all_tables(conn)?;
            conn.execute_batch(SCHEMA_SQL)?;
            conn.execute(
                "INSERT INTO db_meta (key, value) VALUES ('schema_version', ?1)",
                [&target_version.to_string()],
            )?;
            tracing::info!(
                "Database schema changed from version {} to {}, stages must be rebuilt",
                v,
                target_version
            );
            SchemaCreateResult::Recreated
        }
    };

    Ok(result)
}

#[cfg(test)]
pub fn force_set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO db_meta (key, value) VALUES ('schema_version', ?1)",
        [&version.to_string()],
    )?;
    Ok(())
}
