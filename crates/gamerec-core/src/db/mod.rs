//! SQLite database module for gamerec
//!
//! Every stage is a whole table keyed by stage name. Writing a stage replaces
//! its rows and its metadata in one transaction, so readers see either the
//! previous table or the new one.

mod schema;
mod stage;

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{GamerecError, Result};
use crate::map_db_err;
use crate::similarity::{Metric, SimilarityMatrix};
use crate::trace_time;

pub use schema::{create_schema, SchemaCreateResult, CURRENT_SCHEMA_VERSION};
pub use stage::{Stage, StageRow};

/// Database file name inside the store
pub const DB_FILE: &str = "gamerec.db";

/// Summary of one written stage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageInfo {
    pub stage: Stage,
    pub rows: usize,
    pub written_at: DateTime<Utc>,
}

/// SQLite database for gamerec
#[derive(Debug)]
pub struct Database {
    conn: Connection,
    path: PathBuf,
}

impl Database {
    /// Open or create the database at the given store root
    pub fn open(store_root: &Path) -> Result<Self> {
        let db_path = store_root.join(DB_FILE);
        let conn = Connection::open(&db_path).map_err(|e| {
            GamerecError::Other(format!(
                "failed to open database at {}: {}",
                db_path.display(),
                e
            ))
        })?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| map_db_err!("enable WAL mode", e))?;

        if create_schema(&conn).map_err(|e| map_db_err!("create database schema", e))?
            == SchemaCreateResult::Recreated
        {
            tracing::warn!("database schema was reset; rerun `gamerec build`");
        }

        Ok(Database {
            conn,
            path: db_path,
        })
    }

    /// Path of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get_schema_version(&self) -> Result<i32> {
        self.conn
            .query_row(
                "SELECT value FROM db_meta WHERE key = 'schema_version'",
                [],
                |r| r.get::<_, String>(0),
            )
            .map_err(|e| map_db_err!("get schema version", e))?
            .parse()
            .map_err(|e| map_db_err!("parse schema version", e))
    }

    /// Replace a stage table with `rows` as JSON payloads, in order
    pub fn write_items<T>(&self, stage: Stage, items: &[T]) -> Result<()>
    where
        T: Serialize + StageRow,
    {
        let rows = items
            .iter()
            .map(|item| -> Result<(String, String)> {
                Ok((item.row_id().to_string(), serde_json::to_string(item)?))
            })
            .collect::<Result<Vec<_>>>()?;
        self.replace_stage(stage, &rows)
    }

    /// Read a stage table back in canonical order
    pub fn read_items<T: DeserializeOwned>(&self, stage: Stage) -> Result<Vec<T>> {
        self.read_rows(stage)?
            .into_iter()
            .map(|(_, payload)| -> Result<T> { Ok(serde_json::from_str(&payload)?) })
            .collect()
    }

    /// Replace a similarity stage, one row of scores per item
    pub fn write_matrix(
        &self,
        metric: Metric,
        ids: &[String],
        matrix: &SimilarityMatrix,
    ) -> Result<()> {
        if ids.len() != matrix.size() {
            return Err(GamerecError::invariant(format!(
                "{} identifiers for a {}x{} similarity matrix",
                ids.len(),
                matrix.size(),
                matrix.size()
            )));
        }

        let rows = ids
            .iter()
            .zip(matrix.rows())
            .map(|(id, row)| -> Result<(String, String)> {
                Ok((id.clone(), serde_json::to_string(row)?))
            })
            .collect::<Result<Vec<_>>>()?;
        self.replace_stage(Stage::Similarity(metric), &rows)
    }

    /// Read a similarity stage with the identifiers of its rows
    pub fn read_matrix(&self, metric: Metric) -> Result<(Vec<String>, SimilarityMatrix)> {
        let mut ids = Vec::new();
        let mut rows = Vec::new();
        for (id, payload) in self.read_rows(Stage::Similarity(metric))? {
            ids.push(id);
            rows.push(serde_json::from_str::<Vec<f64>>(&payload)?);
        }
        Ok((ids, SimilarityMatrix::from_rows(rows)?))
    }

    /// Metadata for a stage, or `None` if it has never been written
    pub fn stage_info(&self, stage: Stage) -> Result<Option<StageInfo>> {
        let row = self
            .conn
            .query_row(
                "SELECT rows, written_at FROM stage_meta WHERE stage = ?1",
                [stage.name()],
                |r| Ok((r.get::<_, i64>(0)?, r.get::<_, String>(1)?)),
            )
            .optional()
            .map_err(|e| map_db_err!("read stage metadata", e))?;

        row.map(|(rows, written_at)| -> Result<StageInfo> {
            Ok(StageInfo {
                stage,
                rows: rows as usize,
                written_at: parse_timestamp(&written_at)?,
            })
        })
        .transpose()
    }

    /// Metadata for every written stage, in pipeline order
    pub fn list_stages(&self) -> Result<Vec<StageInfo>> {
        let mut stages = Vec::new();
        for stage in Stage::ALL {
            if let Some(info) = self.stage_info(stage)? {
                stages.push(info);
            }
        }
        Ok(stages)
    }

    fn replace_stage(&self, stage: Stage, rows: &[(String, String)]) -> Result<()> {
        let start = Instant::now();
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| map_db_err!("start transaction", e))?;

        tx.execute("DELETE FROM stage_rows WHERE stage = ?1", [stage.name()])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO stage_rows (stage, position, item_id, payload) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for (position, (id, payload)) in rows.iter().enumerate() {
                stmt.execute(params![stage.name(), position as i64, id, payload])?;
            }
        }
        tx.execute(
            "INSERT OR REPLACE INTO stage_meta (stage, rows, written_at) VALUES (?1, ?2, ?3)",
            params![stage.name(), rows.len() as i64, Utc::now().to_rfc3339()],
        )?;

        tx.commit()
            .map_err(|e| map_db_err!("commit stage write", e))?;

        trace_time!(start, "replace_stage", stage = stage.name(), rows = rows.len());
        tracing::debug!(stage = stage.name(), rows = rows.len(), "wrote stage");
        Ok(())
    }

    fn read_rows(&self, stage: Stage) -> Result<Vec<(String, String)>> {
        if self.stage_info(stage)?.is_none() {
            return Err(stage.missing());
        }

        let mut stmt = self.conn.prepare(
            "SELECT item_id, payload FROM stage_rows WHERE stage = ?1 ORDER BY position",
        )?;
        let rows = stmt
            .query_map([stage.name()], |r| Ok((r.get(0)?, r.get(1)?)))?
            .collect::<rusqlite::Result<Vec<(String, String)>>>()?;
        Ok(rows)
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| map_db_err!("parse stage timestamp", e))
}

impl Drop for Database {
    fn drop(&mut self) {
        let _ = self.conn.pragma_update(None, "wal_checkpoint", "TRUNCATE");
    }
}
