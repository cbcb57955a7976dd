//! Record Store Service
//!
//! `SortedRecordStore` implements `RecordStoreApi` over an ordered map
//! guarded by a reader/writer lock.

use crate::access;
use crate::domain::errors::StoreError;
use crate::domain::invariants::invariant_strictly_ascending;
use crate::domain::value_objects::SalaryChange;
use crate::ports::inbound::RecordStoreApi;
use parking_lot::RwLock;
use shared_types::{Actor, EventSink, Key, NoopSink, Record};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Stored payload; the key lives in the map.
#[derive(Debug, Clone)]
struct Slot {
    name: String,
    salary: u32,
}

impl Slot {
    fn to_record(&self, key: Key) -> Record {
        Record::new(key, self.name.clone(), self.salary)
    }
}

/// Ordered record store.
///
/// Iteration order of the backing map is ascending key order, so every
/// traversal sees records exactly as the sorted list would hold them.
pub struct SortedRecordStore {
    records: RwLock<BTreeMap<Key, Slot>>,
    sink: Arc<dyn EventSink>,
}

impl SortedRecordStore {
    /// Create an empty store that publishes no events.
    pub fn new() -> Self {
        Self::with_sink(Arc::new(NoopSink))
    }

    /// Create an empty store that reports access events to `sink`.
    pub fn with_sink(sink: Arc<dyn EventSink>) -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            sink,
        }
    }

    /// Number of resident records.
    ///
    /// Takes the read lock without publishing access events.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validate ordering invariants over a silent snapshot.
    pub fn check_invariants(&self) -> bool {
        let records: Vec<Record> = self
            .records
            .read()
            .iter()
            .map(|(key, slot)| slot.to_record(*key))
            .collect();
        invariant_strictly_ascending(&records)
    }
}

impl Default for SortedRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStoreApi for SortedRecordStore {
    fn insert(
        &self,
        actor: Actor,
        name: &str,
        salary: u32,
        key: Key,
    ) -> Result<Record, StoreError> {
        let mut records = access::write(&self.records, self.sink.as_ref(), actor);

        match records.entry(key) {
            Entry::Occupied(_) => {
                debug!(%actor, key, name, "Insert rejected, key already resident");
                Err(StoreError::Duplicate { key })
            }
            Entry::Vacant(vacant) => {
                vacant.insert(Slot {
                    name: name.to_owned(),
                    salary,
                });
                Ok(Record::new(key, name, salary))
            }
        }
    }

    fn delete(&self, actor: Actor, name: &str, key: Key) -> Result<Record, StoreError> {
        let mut records = access::write(&self.records, self.sink.as_ref(), actor);

        match records.remove(&key) {
            Some(slot) => Ok(Record::new(key, slot.name, slot.salary)),
            None => {
                debug!(%actor, key, name, "Delete target not found");
                Err(StoreError::NotFound { key })
            }
        }
    }

    fn update(
        &self,
        actor: Actor,
        name: &str,
        new_salary: u32,
        key: Key,
    ) -> Result<SalaryChange, StoreError> {
        let mut records = access::write(&self.records, self.sink.as_ref(), actor);

        let Some(slot) = records.get_mut(&key) else {
            debug!(%actor, key, name, "Update target not found");
            return Err(StoreError::NotFound { key });
        };

        let before = slot.to_record(key);
        slot.salary = new_salary;
        Ok(SalaryChange {
            before,
            after: slot.to_record(key),
        })
    }

    fn search(&self, actor: Actor, _name: &str, key: Key) -> Option<Record> {
        let records = access::read(&self.records, self.sink.as_ref(), actor);
        records.get(&key).map(|slot| slot.to_record(key))
    }

    fn snapshot(&self, actor: Actor) -> Vec<Record> {
        let records = access::read(&self.records, self.sink.as_ref(), actor);
        records
            .iter()
            .map(|(key, slot)| slot.to_record(*key))
            .collect()
    }
}
