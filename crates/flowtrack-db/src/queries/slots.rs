//! Key-value slot queries.
//!
//! A slot is a named text value. Writes replace the previous value entirely.

use crate::pool::{DbError, DbPool, DbResult};
use rusqlite::{params, OptionalExtension};

/// Slot row from database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRow {
    pub key: String,
    pub value: String,
    pub updated_at: String,
}

/// Slot metadata without the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotInfo {
    pub key: String,
    pub bytes: i64,
    pub updated_at: String,
}

/// Get a slot by key.
pub fn get_slot(pool: &DbPool, key: &str) -> DbResult<Option<SlotRow>> {
    pool.with_conn(|conn| {
        conn.query_row(
            "SELECT key, value, updated_at FROM slots WHERE key = ?1",
            params![key],
            |row| {
                Ok(SlotRow {
                    key: row.get(0)?,
                    value: row.get(1)?,
                    updated_at: row.get(2)?,
                })
            },
        )
        .optional()
        .map_err(DbError::from)
    })
}

/// Write a slot, replacing any previous value.
pub fn put_slot(pool: &DbPool, key: &str, value: &str) -> DbResult<()> {
    let now = chrono::Utc::now().to_rfc3339();
    pool.with_conn(|conn| {
        conn.execute(
            "INSERT INTO slots (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE
             SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )?;
        Ok(())
    })
}

/// Delete a slot. Returns whether a row was removed.
pub fn delete_slot(pool: &DbPool, key: &str) -> DbResult<bool> {
    pool.with_conn(|conn| {
        let changed = conn.execute("DELETE FROM slots WHERE key = ?1", params![key])?;
        Ok(changed > 0)
    })
}

/// List all slots ordered by key.
pub fn list_slots(pool: &DbPool) -> DbResult<Vec<SlotInfo>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT key, length(CAST(value AS BLOB)), updated_at FROM slots ORDER BY key ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(SlotInfo {
                key: row.get(0)?,
                bytes: row.get(1)?,
                updated_at: row.get(2)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init_memory_pool;

    #[test]
    fn test_get_missing_slot() {
        let pool = init_memory_pool().unwrap();
        assert_eq!(get_slot(&pool, "nope").unwrap(), None);
    }

    #[test]
    fn test_put_overwrites() {
        let pool = init_memory_pool().unwrap();
        put_slot(&pool, "flowtrack-store", "{\"a\":1}").unwrap();
        put_slot(&pool, "flowtrack-store", "{\"b\":2}").unwrap();

        let row = get_slot(&pool, "flowtrack-store").unwrap().unwrap();
        assert_eq!(row.value, "{\"b\":2}");
        assert!(chrono::DateTime::parse_from_rfc3339(&row.updated_at).is_ok());
        assert_eq!(list_slots(&pool).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_slot() {
        let pool = init_memory_pool().unwrap();
        put_slot(&pool, "k", "v").unwrap();
        assert!(delete_slot(&pool, "k").unwrap());
        assert!(!delete_slot(&pool, "k").unwrap());
        assert_eq!(get_slot(&pool, "k").unwrap(), None);
    }

    #[test]
    fn test_list_slots_reports_size() {
        let pool = init_memory_pool().unwrap();
        put_slot(&pool, "b", "12345").unwrap();
        put_slot(&pool, "a", "").unwrap();

        let slots = list_slots(&pool).unwrap();
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].key, "a");
        assert_eq!(slots[0].bytes, 0);
        assert_eq!(slots[1].key, "b");
        assert_eq!(slots[1].bytes, 5);
    }

    #[test]
    fn test_slots_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flowtrack.db");

        {
            let pool = crate::init_pool(&path).unwrap();
            put_slot(&pool, "flowtrack-store", "persisted").unwrap();
        }

        let pool = crate::init_pool(&path).unwrap();
        let row = get_slot(&pool, "flowtrack-store").unwrap().unwrap();
        assert_eq!(row.value, "persisted");
    }
}
