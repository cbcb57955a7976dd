//! Event-bracketed store lock guards.

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use shared_types::{AccessMode, Actor, ChashEvent, EventSink};
use std::ops::{Deref, DerefMut};

/// Lock guard that publishes `AccessReleased` when dropped.
///
/// The release event is published before the underlying lock is let go, so
/// in the event stream a release always precedes the next acquisition.
pub(crate) struct Access<'a, G> {
    guard: G,
    sink: &'a dyn EventSink,
    actor: Actor,
    mode: AccessMode,
}

pub(crate) fn read<'a, T>(
    lock: &'a RwLock<T>,
    sink: &'a dyn EventSink,
    actor: Actor,
) -> Access<'a, RwLockReadGuard<'a, T>> {
    let mode = AccessMode::Read;
    sink.publish(ChashEvent::AccessRequested { actor, mode });
    let guard = lock.read();
    sink.publish(ChashEvent::AccessAcquired { actor, mode });
    Access {
        guard,
        sink,
        actor,
        mode,
    }
}

pub(crate) fn write<'a, T>(
    lock: &'a RwLock<T>,
    sink: &'a dyn EventSink,
    actor: Actor,
) -> Access<'a, RwLockWriteGuard<'a, T>> {
    let mode = AccessMode::Write;
    sink.publish(ChashEvent::AccessRequested { actor, mode });
    let guard = lock.write();
    sink.publish(ChashEvent::AccessAcquired { actor, mode });
    Access {
        guard,
        sink,
        actor,
        mode,
    }
}

impl<G: Deref> Deref for Access<'_, G> {
    type Target = G::Target;

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

impl<G: DerefMut> DerefMut for Access<'_, G> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.guard
    }
}

impl<G> Drop for Access<'_, G> {
    fn drop(&mut self) {
        self.sink.publish(ChashEvent::AccessReleased {
            actor: self.actor,
            mode: self.mode,
        });
    }
}
