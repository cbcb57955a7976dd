//! # Run Events
//!
//! Structured events emitted while a batch executes. The scheduler emits
//! the turn events, the store emits the access events and workers emit the
//! operation event. Sinks render them; the runtime's sink writes `hash.log`.
//!
//! Events from one actor reach the sink in that actor's real-time order.
//! Events from different actors may interleave arbitrarily.

use crate::entities::{Actor, CommandKind, Key};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Store access mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessMode {
    /// Shared access for `search` and `snapshot`.
    Read,
    /// Exclusive access for `insert`, `delete` and `update`.
    Write,
}

impl AccessMode {
    pub fn label(self) -> &'static str {
        match self {
            AccessMode::Read => "READ",
            AccessMode::Write => "WRITE",
        }
    }
}

/// All events a run can produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChashEvent {
    // =========================================================================
    // TURN SCHEDULER
    // =========================================================================
    /// Worker entered its turn-wait. Emitted once per worker.
    Waiting { actor: Actor },

    /// Worker's turn predicate became true. Emitted once per worker.
    Awakened { actor: Actor },

    // =========================================================================
    // RECORD STORE
    // =========================================================================
    /// Actor is about to block on the store lock.
    AccessRequested { actor: Actor, mode: AccessMode },

    /// Actor holds the store lock.
    AccessAcquired { actor: Actor, mode: AccessMode },

    /// Actor released the store lock.
    AccessReleased { actor: Actor, mode: AccessMode },

    // =========================================================================
    // WORKER
    // =========================================================================
    /// A worker is executing its command. `key` and `name` are absent for
    /// `Print`; `salary` is present only for `Insert` and `Update`.
    Operation {
        actor: Actor,
        kind: CommandKind,
        key: Option<Key>,
        name: Option<String>,
        salary: Option<u32>,
    },
}

impl ChashEvent {
    /// The actor the event belongs to.
    pub fn actor(&self) -> Actor {
        match self {
            ChashEvent::Waiting { actor }
            | ChashEvent::Awakened { actor }
            | ChashEvent::AccessRequested { actor, .. }
            | ChashEvent::AccessAcquired { actor, .. }
            | ChashEvent::AccessReleased { actor, .. }
            | ChashEvent::Operation { actor, .. } => *actor,
        }
    }
}

/// Receiver of run events.
///
/// Implementations must be cheap and must not call back into the store or
/// the scheduler: events are published while their locks are held.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: ChashEvent);
}

/// Sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn publish(&self, _event: ChashEvent) {}
}

/// Sink that keeps every event in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<ChashEvent>>,
    published: AtomicU64,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all events received so far.
    pub fn events(&self) -> Vec<ChashEvent> {
        self.events.lock().clone()
    }

    /// Events belonging to `actor`, in arrival order.
    pub fn events_for(&self, actor: Actor) -> Vec<ChashEvent> {
        self.events
            .lock()
            .iter()
            .filter(|event| event.actor() == actor)
            .cloned()
            .collect()
    }

    pub fn events_published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }
}

impl EventSink for MemorySink {
    fn publish(&self, event: ChashEvent) {
        self.events.lock().push(event);
        self.published.fetch_add(1, Ordering::Relaxed);
    }
}
