//! In-memory state store.
//!
//! # Responsibility
//! - Provide a process-local backend for tests and ephemeral sessions.
//!
//! # Invariants
//! - Clones share one backing map, so a reload from a cloned handle
//!   observes all previous writes (mirrors reopening browser storage).

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use super::{StateStore, StorageResult};

/// Shared-handle in-memory implementation of the state store port.
#[derive(Debug, Clone, Default)]
pub struct MemoryStateStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
