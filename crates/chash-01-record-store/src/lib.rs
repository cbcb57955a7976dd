//! # CHASH-01: Record Store
//!
//! Ordered, concurrency-safe collection of employee records keyed by the
//! Jenkins hash of the record name.
//!
//! ## Architecture
//!
//! - **Domain**: errors, value objects (`SalaryChange`), invariants
//! - **Ports**: Inbound (`RecordStoreApi`)
//! - **Service**: `SortedRecordStore`, a reader/writer-locked ordered map
//!
//! ## Access discipline
//!
//! Mutations hold exclusive access and reads hold shared access for the
//! whole traversal. Every acquisition is bracketed by `AccessRequested`,
//! `AccessAcquired` and `AccessReleased` events, including operations that
//! return early with `Duplicate` or `NotFound`.

mod access;
pub mod domain;
pub mod ports;
pub mod service;

pub use domain::errors::StoreError;
pub use domain::invariants::invariant_strictly_ascending;
pub use domain::value_objects::SalaryChange;
pub use ports::inbound::RecordStoreApi;
pub use service::SortedRecordStore;
