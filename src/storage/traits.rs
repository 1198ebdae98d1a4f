//! Snapshot store trait and error types

use crate::snapshot::PageSnapshot;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for snapshot store backends
///
/// The store is an append-only, per-URL ordered log of snapshots. A
/// snapshot is never updated after insertion; history queries and the
/// retention purge are the only other operations.
pub trait SnapshotStore {
    /// Appends one snapshot as a single atomic insert
    ///
    /// # Returns
    ///
    /// The row ID of the stored snapshot
    fn append(&mut self, snapshot: &PageSnapshot) -> StorageResult<i64>;

    /// Returns up to `n` most recent snapshots for a URL, newest first
    fn last_n(&self, url: &str, n: usize) -> StorageResult<Vec<PageSnapshot>>;

    /// Deletes snapshots strictly older than the cutoff timestamp
    ///
    /// The cutoff is a 14-digit `YYYYMMDDhhmmss` string compared against the
    /// stored timestamps as text; the fixed width and zero padding are what
    /// make that comparison correct.
    ///
    /// # Returns
    ///
    /// The number of deleted snapshots
    fn delete_older_than(&mut self, cutoff_timestamp: &str) -> StorageResult<usize>;

    // ===== Statistics =====

    /// Total number of stored snapshots
    fn count_snapshots(&self) -> StorageResult<u64>;

    /// Number of distinct URLs with at least one snapshot
    fn count_urls(&self) -> StorageResult<u64>;

    /// Sorted list of distinct URLs with at least one snapshot
    fn tracked_urls(&self) -> StorageResult<Vec<String>>;
}
