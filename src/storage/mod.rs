//! Snapshot persistence
//!
//! This module owns the append-only snapshot log:
//! - The [`SnapshotStore`] trait the orchestrator works against
//! - A SQLite implementation with its schema
//! - The retention purge by fixed-width timestamp cutoff

mod schema;
mod sqlite;
mod traits;

pub use schema::initialize_schema;
pub use sqlite::SqliteStore;
pub use traits::{SnapshotStore, StorageError, StorageResult};
