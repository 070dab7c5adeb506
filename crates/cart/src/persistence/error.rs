//! Persistence error types.

use thiserror::Error;

use crate::state::TotalOverflow;

/// Errors raised by cart persistence adapters.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Reading or writing the storage medium failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored document does not have the cart shape.
    #[error("Stored cart has an unexpected shape: {0}")]
    Shape(#[from] serde_json::Error),

    /// The stored items are well formed but their total is not
    /// representable.
    #[error("Stored cart cannot be totalled: {0}")]
    Overflow(#[from] TotalOverflow),

    /// The stored document was written by an unknown format version.
    #[error("Unsupported cart storage version: {0}")]
    UnsupportedVersion(u32),

    /// A previous holder of the storage lock panicked.
    #[error("Storage lock poisoned")]
    Poisoned,
}
