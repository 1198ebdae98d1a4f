//! SQLite snapshot store implementation

use crate::snapshot::PageSnapshot;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{SnapshotStore, StorageResult};
use rusqlite::{params, Connection};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) a snapshot database at the given path
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        // Configure SQLite for better performance
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

/// Column list shared by every snapshot SELECT
const SNAPSHOT_COLUMNS: &str = "url, timestamp, status_code, raw_html, title, has_title, \
     canonical, is_canonical_self_ref, meta_description, has_meta_description, \
     h1, has_h1, multiple_h1s";

/// Intermediate row with the h1 list still JSON-encoded
struct SnapshotRow {
    snapshot: PageSnapshot,
    h1_json: String,
}

fn read_snapshot_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SnapshotRow> {
    Ok(SnapshotRow {
        snapshot: PageSnapshot {
            url: row.get(0)?,
            timestamp: row.get(1)?,
            status_code: row.get(2)?,
            raw_html: row.get(3)?,
            title: row.get(4)?,
            has_title: row.get(5)?,
            canonical: row.get(6)?,
            is_canonical_self_ref: row.get(7)?,
            meta_description: row.get(8)?,
            has_meta_description: row.get(9)?,
            h1: Vec::new(),
            has_h1: row.get(11)?,
            multiple_h1s: row.get(12)?,
        },
        h1_json: row.get(10)?,
    })
}

impl SnapshotStore for SqliteStore {
    fn append(&mut self, snapshot: &PageSnapshot) -> StorageResult<i64> {
        let h1_json = serde_json::to_string(&snapshot.h1)?;

        self.conn.execute(
            "INSERT INTO snapshots (url, timestamp, status_code, raw_html, title, has_title,
             canonical, is_canonical_self_ref, meta_description, has_meta_description,
             h1, has_h1, multiple_h1s)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                snapshot.url,
                snapshot.timestamp,
                snapshot.status_code,
                snapshot.raw_html,
                snapshot.title,
                snapshot.has_title,
                snapshot.canonical,
                snapshot.is_canonical_self_ref,
                snapshot.meta_description,
                snapshot.has_meta_description,
                h1_json,
                snapshot.has_h1,
                snapshot.multiple_h1s,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn last_n(&self, url: &str, n: usize) -> StorageResult<Vec<PageSnapshot>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM snapshots WHERE url = ?1
             ORDER BY timestamp DESC, id DESC LIMIT ?2",
            SNAPSHOT_COLUMNS
        ))?;

        let rows = stmt.query_map(params![url, n as i64], read_snapshot_row)?;

        let mut snapshots = Vec::new();
        for row in rows {
            let SnapshotRow {
                mut snapshot,
                h1_json,
            } = row?;
            snapshot.h1 = serde_json::from_str(&h1_json)?;
            snapshots.push(snapshot);
        }

        Ok(snapshots)
    }

    fn delete_older_than(&mut self, cutoff_timestamp: &str) -> StorageResult<usize> {
        let deleted = self.conn.execute(
            "DELETE FROM snapshots WHERE timestamp < ?1",
            params![cutoff_timestamp],
        )?;
        Ok(deleted)
    }

    fn count_snapshots(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM snapshots", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn count_urls(&self) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(DISTINCT url) FROM snapshots",
            [],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn tracked_urls(&self) -> StorageResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT url FROM snapshots ORDER BY url")?;

        let rows = stmt.query_map([], |row| row.get(0))?;

        let mut urls = Vec::new();
        for row in rows {
            urls.push(row?);
        }

        Ok(urls)
    }
}
