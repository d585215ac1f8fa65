//! SQLite form store
//!
//! One table, one opaque JSON document per row. The store does not look
//! inside `schema_json`.

use std::path::Path;

use chrono::Utc;
use formsmith_core::{import_document, FormPayload, FormRecord, SchemaEditor};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, Row};
use thiserror::Error;
use tracing::info;

const MIGRATION: &str = "
    CREATE TABLE IF NOT EXISTS form_schemas (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        description TEXT,
        schema_json TEXT NOT NULL,
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
        updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
    );
";

const SELECT_COLUMNS: &str = "SELECT id, title, description, schema_json, created_at, updated_at FROM form_schemas";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("seed document error: {0}")]
    Seed(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

pub struct FormStore {
    conn: Mutex<Connection>,
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<FormRecord> {
    Ok(FormRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        schema_json: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

impl FormStore {
    pub fn open(path: &Path) -> StoreResult<Self> {
        Ok(Self { conn: Mutex::new(Connection::open(path)?) })
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self { conn: Mutex::new(Connection::open_in_memory()?) })
    }

    /// Create the table if it does not exist
    pub fn migrate(&self) -> StoreResult<()> {
        self.conn.lock().execute_batch(MIGRATION)?;
        Ok(())
    }

    pub fn count(&self) -> StoreResult<i64> {
        let conn = self.conn.lock();
        Ok(conn.query_row("SELECT COUNT(*) FROM form_schemas", [], |row| row.get(0))?)
    }

    /// Newest first; rows created in the same instant fall back to id order
    pub fn list(&self) -> StoreResult<Vec<FormRecord>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&format!("{} ORDER BY created_at DESC, id DESC", SELECT_COLUMNS))?;
        let records = stmt
            .query_map([], row_to_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    pub fn get(&self, id: i64) -> StoreResult<Option<FormRecord>> {
        let conn = self.conn.lock();
        Self::get_locked(&conn, id)
    }

    fn get_locked(conn: &Connection, id: i64) -> StoreResult<Option<FormRecord>> {
        Ok(conn
            .query_row(&format!("{} WHERE id = ?1", SELECT_COLUMNS), params![id], row_to_record)
            .optional()?)
    }

    pub fn insert(&self, payload: &FormPayload) -> StoreResult<FormRecord> {
        let conn = self.conn.lock();
        let now = Utc::now();
        conn.execute(
            "INSERT INTO form_schemas (title, description, schema_json, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)",
            params![payload.title, payload.description, payload.schema_json, now],
        )?;
        let id = conn.last_insert_rowid();
        Self::get_locked(&conn, id)?.ok_or(StoreError::Database(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Last write wins. Returns `None` when no row has this id.
    pub fn update(&self, id: i64, payload: &FormPayload) -> StoreResult<Option<FormRecord>> {
        let conn = self.conn.lock();
        let changed = conn.execute(
            "UPDATE form_schemas SET title = ?1, description = ?2, schema_json = ?3, updated_at = ?4 WHERE id = ?5",
            params![payload.title, payload.description, payload.schema_json, Utc::now(), id],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        Self::get_locked(&conn, id)
    }

    /// Returns whether a row was removed
    pub fn delete(&self, id: i64) -> StoreResult<bool> {
        let conn = self.conn.lock();
        Ok(conn.execute("DELETE FROM form_schemas WHERE id = ?1", params![id])? > 0)
    }

    /// Insert the example document at `path` when the table is empty.
    pub fn seed_if_empty(&self, path: &Path) -> StoreResult<Option<FormRecord>> {
        if self.count()? > 0 {
            return Ok(None);
        }
        let text = std::fs::read_to_string(path)?;
        let schema = import_document(&text).map_err(|e| StoreError::Seed(e.to_string()))?;
        let payload = SchemaEditor::from_schema(schema)
            .payload()
            .map_err(|e| StoreError::Seed(e.to_string()))?;
        let record = self.insert(&payload)?;
        info!(id = record.id, path = %path.display(), "inserted example form schema");
        Ok(Some(record))
    }
}
