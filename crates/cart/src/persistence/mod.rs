//! Cart persistence adapters.
//!
//! The cart is stored as one JSON document in a single key/value slot named
//! [`STORAGE_KEY`]:
//!
//! ```json
//! {"state": {"items": [{"id": 1, "name": "Tea", "price": "50000", "quantity": 2}], "total": "100000"}, "version": 0}
//! ```
//!
//! Adapters only encode and decode; deciding what to do with a failure is
//! the store's job.

mod error;
mod file;
mod memory;

use serde::{Deserialize, Serialize};

use crate::item::CartLineItem;
use crate::state::CartState;

pub use error::PersistenceError;
pub use file::FilePersistence;
pub use memory::MemoryPersistence;

/// Fixed name of the storage slot holding the cart.
pub const STORAGE_KEY: &str = "cart-storage";

/// Version written into every envelope. There is no migration scheme; any
/// other version is rejected.
pub const STORAGE_VERSION: u32 = 0;

/// A place the cart can be rehydrated from and saved to.
pub trait CartPersistence {
    /// Read the stored cart.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be read or its contents do not
    /// decode into a cart.
    fn load(&self) -> Result<Option<CartState>, PersistenceError>;

    /// Replace the stored cart with `state`.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be written.
    fn save(&self, state: &CartState) -> Result<(), PersistenceError>;
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    state: &'a CartState,
    version: u32,
}

#[derive(Deserialize)]
struct Envelope {
    state: StoredState,
    version: u32,
}

// Any stored `total` is ignored and recomputed from the items.
#[derive(Deserialize)]
struct StoredState {
    items: Vec<CartLineItem>,
}

/// Encode a cart into the stored JSON document.
///
/// # Errors
///
/// Returns [`PersistenceError::Shape`] if serialization fails.
pub fn encode(state: &CartState) -> Result<String, PersistenceError> {
    let envelope = EnvelopeRef {
        state,
        version: STORAGE_VERSION,
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Decode a stored JSON document into a cart.
///
/// # Errors
///
/// Returns [`PersistenceError::Shape`] if the document does not match the
/// expected shape, [`PersistenceError::UnsupportedVersion`] for an
/// unknown version, or [`PersistenceError::Overflow`] if the items cannot be
/// totalled.
pub fn decode(raw: &str) -> Result<CartState, PersistenceError> {
    let envelope: Envelope = serde_json::from_str(raw)?;
    if envelope.version != STORAGE_VERSION {
        return Err(PersistenceError::UnsupportedVersion(envelope.version));
    }
    Ok(CartState::from_items(envelope.state.items)?)
}
