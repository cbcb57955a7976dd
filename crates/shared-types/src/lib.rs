//! # Shared Types Crate
//!
//! Types shared by every CHASH crate.
//!
//! ## Contents
//!
//! - **Entities**: `Record`, `Command`, `CommandKind`, `TurnTicket`, `Actor`
//! - **Hashing**: `hash_key`, the Jenkins one-at-a-time key derivation
//! - **Events**: `ChashEvent` and the `EventSink` port every worker reports to
//!
//! ## Design Principles
//!
//! - **Key is identity**: store operations locate records by key only; the
//!   name travels with the record but never participates in lookups.
//! - **Copies out**: readers receive owned `Record` values, never references
//!   into the store.

pub mod entities;
pub mod events;
pub mod hash;

pub use entities::*;
pub use events::{AccessMode, ChashEvent, EventSink, MemorySink, NoopSink};
pub use hash::hash_key;
