//! Database schema definitions
//!
//! This module contains the SQL schema for the snapshot database.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Append-only log of page snapshots, ordered per URL by timestamp
CREATE TABLE IF NOT EXISTS snapshots (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    url TEXT NOT NULL,
    timestamp TEXT NOT NULL,
    status_code INTEGER,
    raw_html TEXT NOT NULL,
    title TEXT NOT NULL,
    has_title INTEGER NOT NULL,
    canonical TEXT NOT NULL,
    is_canonical_self_ref INTEGER NOT NULL,
    meta_description TEXT NOT NULL,
    has_meta_description INTEGER NOT NULL,
    h1 TEXT NOT NULL,
    has_h1 INTEGER NOT NULL,
    multiple_h1s INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_snapshots_url_timestamp ON snapshots(url, timestamp);
CREATE INDEX IF NOT EXISTS idx_snapshots_timestamp ON snapshots(timestamp);
"#;

/// Initializes the database schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_initializes() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(initialize_schema(&conn).is_ok());
    }

    #[test]
    fn test_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        initialize_schema(&conn).unwrap();
        assert!(initialize_schema(&conn).is_ok());
    }

    #[test]
    fn test_snapshots_table_exists_after_init() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='snapshots'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }
}
