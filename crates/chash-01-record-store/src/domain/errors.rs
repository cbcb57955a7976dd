//! Error types for the Record Store

use shared_types::Key;
use thiserror::Error;

/// Expected, non-fatal outcomes of store operations.
///
/// These are business results reported back to the caller, not faults:
/// the store is unchanged whenever one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Insert target key is already resident.
    #[error("Entry {key} is a duplicate")]
    Duplicate { key: Key },

    /// Delete or update target key is absent.
    #[error("Entry {key} not found")]
    NotFound { key: Key },
}

impl StoreError {
    pub fn key(&self) -> Key {
        match self {
            StoreError::Duplicate { key } | StoreError::NotFound { key } => *key,
        }
    }
}
