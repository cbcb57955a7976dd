//! Inbound Ports (Driving Ports / API)

use crate::domain::errors::StoreError;
use crate::domain::value_objects::SalaryChange;
use shared_types::{Actor, Key, Record};

/// Primary Record Store API
///
/// Every method takes the acting party so access events can be attributed.
/// `key` is always the caller-computed hash of `name` and is the only
/// field used to locate records.
pub trait RecordStoreApi: Send + Sync {
    /// Insert a new record at its sorted position.
    ///
    /// Fails with `Duplicate` and leaves the store unchanged if `key` is
    /// already resident.
    fn insert(&self, actor: Actor, name: &str, salary: u32, key: Key)
        -> Result<Record, StoreError>;

    /// Remove the record with `key`, returning it as it was at removal.
    fn delete(&self, actor: Actor, name: &str, key: Key) -> Result<Record, StoreError>;

    /// Overwrite the salary of the record with `key` in place.
    fn update(
        &self,
        actor: Actor,
        name: &str,
        new_salary: u32,
        key: Key,
    ) -> Result<SalaryChange, StoreError>;

    /// Copy of the record with `key`, if resident.
    fn search(&self, actor: Actor, name: &str, key: Key) -> Option<Record>;

    /// Point-in-time copy of every record in ascending key order.
    fn snapshot(&self, actor: Actor) -> Vec<Record>;
}
