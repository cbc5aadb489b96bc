//! FlowTrack Database Layer
//!
//! SQLite-backed key-value slots. Each slot holds one serialized snapshot
//! that is replaced wholesale on every write.

pub mod migrations;
pub mod pool;
pub mod queries;

pub use pool::{DbError, DbPool, DbResult};

use std::path::Path;
use tracing::debug;

/// Open (or create) the database at `path` and bring its schema up to date.
pub fn init_pool(path: &Path) -> DbResult<DbPool> {
    let pool = DbPool::open(path)?;
    migrations::run_migrations(&pool)?;
    debug!(path = %path.display(), "Database ready");
    Ok(pool)
}

/// Create a migrated in-memory database. Nothing survives the process.
pub fn init_memory_pool() -> DbResult<DbPool> {
    let pool = DbPool::in_memory()?;
    migrations::run_migrations(&pool)?;
    Ok(pool)
}
