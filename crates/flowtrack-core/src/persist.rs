//! Snapshot persistence over key-value slots.
//!
//! `load` and `save` never fail outward. A missing, empty or corrupt slot
//! loads the fallback; a failed write is logged and the in-memory state
//! stays authoritative.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::error::FlowResult;
use flowtrack_db::queries::slots;
use flowtrack_db::DbPool;

/// A key-value slot backend.
pub trait SlotStorage {
    /// Read the raw value stored under `key`.
    fn read(&self, key: &str) -> FlowResult<Option<String>>;

    /// Replace the value stored under `key`.
    fn write(&mut self, key: &str, value: &str) -> FlowResult<()>;
}

impl SlotStorage for DbPool {
    fn read(&self, key: &str) -> FlowResult<Option<String>> {
        Ok(slots::get_slot(self, key)?.map(|row| row.value))
    }

    fn write(&mut self, key: &str, value: &str) -> FlowResult<()> {
        slots::put_slot(self, key, value)?;
        Ok(())
    }
}

impl<S: SlotStorage + ?Sized> SlotStorage for Box<S> {
    fn read(&self, key: &str) -> FlowResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> FlowResult<()> {
        (**self).write(key, value)
    }
}

/// Process-local storage. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value of a slot.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }

    /// Put a raw value into a slot, bypassing serialization.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.slots.insert(key.into(), value.into());
    }
}

impl SlotStorage for MemoryStorage {
    fn read(&self, key: &str) -> FlowResult<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> FlowResult<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Read and deserialize the slot, or return `fallback`.
pub fn load<T, S>(storage: &S, key: &str, fallback: T) -> T
where
    T: DeserializeOwned,
    S: SlotStorage + ?Sized,
{
    let raw = match storage.read(key) {
        Ok(Some(raw)) if !raw.trim().is_empty() => raw,
        Ok(_) => {
            debug!(key, "Slot is empty, using fallback");
            return fallback;
        }
        Err(e) => {
            warn!(key, error = %e, "Storage read failed");
            return fallback;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "Stored snapshot is corrupt, using fallback");
            fallback
        }
    }
}

/// Serialize `value` and overwrite the slot. Failures are logged and swallowed.
pub fn save<T, S>(storage: &mut S, key: &str, value: &T)
where
    T: Serialize + ?Sized,
    S: SlotStorage + ?Sized,
{
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(key, error = %e, "Snapshot serialization failed");
            return;
        }
    };

    match storage.write(key, &raw) {
        Ok(()) => debug!(key, bytes = raw.len(), "Snapshot saved"),
        Err(e) => warn!(key, error = %e, "Storage write failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::seed::demo_state;
    use crate::board::AppState;
    use crate::error::FlowtrackError;

    /// Backend whose every operation fails.
    struct Unavailable;

    impl SlotStorage for Unavailable {
        fn read(&self, _key: &str) -> FlowResult<Option<String>> {
            Err(FlowtrackError::storage_unavailable("disabled"))
        }

        fn write(&mut self, _key: &str, _value: &str) -> FlowResult<()> {
            Err(FlowtrackError::storage_unavailable("quota exceeded"))
        }
    }

    #[test]
    fn test_round_trip_memory() {
        let mut storage = MemoryStorage::new();
        let state = demo_state();
        save(&mut storage, "flowtrack-store", &state);

        let loaded: AppState = load(&storage, "flowtrack-store", AppState::default());
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_round_trip_sqlite() {
        let mut pool = flowtrack_db::init_memory_pool().unwrap();
        let state = demo_state();
        save(&mut pool, "flowtrack-store", &state);

        let loaded: AppState = load(&pool, "flowtrack-store", AppState::default());
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_missing_key_returns_fallback() {
        let storage = MemoryStorage::new();
        let loaded: AppState = load(&storage, "absent", demo_state());
        assert_eq!(loaded.boards[0].name, "Producto");
    }

    #[test]
    fn test_empty_value_returns_fallback() {
        let mut storage = MemoryStorage::new();
        storage.insert("k", "   ");
        let loaded: Vec<u32> = load(&storage, "k", vec![7]);
        assert_eq!(loaded, vec![7]);
    }

    #[test]
    fn test_corrupt_value_returns_fallback() {
        let mut storage = MemoryStorage::new();
        storage.insert("k", "{\"boards\": [oops");
        let loaded: AppState = load(&storage, "k", AppState::default());
        assert_eq!(loaded, AppState::default());
    }

    #[test]
    fn test_wrong_shape_returns_fallback() {
        let mut storage = MemoryStorage::new();
        storage.insert("k", "{\"boards\": 12}");
        let loaded: AppState = load(&storage, "k", AppState::default());
        assert_eq!(loaded, AppState::default());
    }

    #[test]
    fn test_unavailable_storage_is_swallowed() {
        let mut storage = Unavailable;
        save(&mut storage, "k", &demo_state());
        let loaded: AppState = load(&storage, "k", AppState::default());
        assert_eq!(loaded, AppState::default());
    }

    #[test]
    fn test_save_replaces_previous_snapshot() {
        let mut storage = MemoryStorage::new();
        save(&mut storage, "k", &demo_state());
        save(&mut storage, "k", &AppState::default());
        assert_eq!(storage.get("k"), Some("{\"boards\":[],\"activeBoardId\":\"\"}"));
    }

    #[test]
    fn test_boxed_storage() {
        let mut storage: Box<dyn SlotStorage> = Box::new(MemoryStorage::new());
        save(&mut storage, "k", &vec![1, 2, 3]);
        let loaded: Vec<i32> = load(&storage, "k", Vec::new());
        assert_eq!(loaded, vec![1, 2, 3]);
    }
}
