//! In-process key/value storage.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{CartPersistence, PersistenceError, STORAGE_KEY, decode, encode};
use crate::state::CartState;

/// Cart persistence backed by a shared in-memory key/value map.
///
/// Clones share the same map, so a test can hand one clone to a
/// [`crate::CartStore`] and inspect what it wrote through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryPersistence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw stored document, if any.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.slots
            .lock()
            .ok()
            .and_then(|slots| slots.get(STORAGE_KEY).cloned())
    }

    /// Overwrite the stored document, e.g. to simulate another writer.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Poisoned`] if the map lock is poisoned.
    pub fn set_raw(&self, raw: impl Into<String>) -> Result<(), PersistenceError> {
        let mut slots = self.slots.lock().map_err(|_| PersistenceError::Poisoned)?;
        slots.insert(STORAGE_KEY.to_string(), raw.into());
        Ok(())
    }
}

impl CartPersistence for MemoryPersistence {
    fn load(&self) -> Result<Option<CartState>, PersistenceError> {
        let slots = self.slots.lock().map_err(|_| PersistenceError::Poisoned)?;
        slots.get(STORAGE_KEY).map(|raw| decode(raw)).transpose()
    }

    fn save(&self, state: &CartState) -> Result<(), PersistenceError> {
        let raw = encode(state)?;
        self.set_raw(raw)
    }
}
