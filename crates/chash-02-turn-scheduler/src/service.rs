//! Turn Scheduler Service
//!
//! A monitor: one mutex guarding `SchedulerState` plus one condition
//! variable that is broadcast on every state change. The state is never
//! read without the mutex held.

use crate::domain::errors::ScheduleError;
use crate::domain::state::{Advance, SchedulerState};
use parking_lot::{Condvar, Mutex};
use shared_types::{Actor, ChashEvent, EventSink, NoopSink, Priority, TurnTicket};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Priority-gated FIFO turn scheduler.
///
/// Safe to share across threads by reference or `Arc`. Each worker calls
/// [`TurnScheduler::wait_turn`] once and completes the returned permit once.
pub struct TurnScheduler {
    state: Mutex<SchedulerState>,
    turn_changed: Condvar,
    sink: Arc<dyn EventSink>,
}

impl TurnScheduler {
    /// Build a scheduler for a complete batch of tickets.
    pub fn new<'a, I>(tickets: I) -> Result<Self, ScheduleError>
    where
        I: IntoIterator<Item = &'a TurnTicket>,
    {
        Self::with_sink(tickets, Arc::new(NoopSink))
    }

    /// Build a scheduler that reports turn events to `sink`.
    pub fn with_sink<'a, I>(tickets: I, sink: Arc<dyn EventSink>) -> Result<Self, ScheduleError>
    where
        I: IntoIterator<Item = &'a TurnTicket>,
    {
        let state = SchedulerState::from_tickets(tickets)?;
        debug!(
            active_priority = ?state.active_priority(),
            "Turn scheduler initialized"
        );
        Ok(Self {
            state: Mutex::new(state),
            turn_changed: Condvar::new(),
            sink,
        })
    }

    /// Block until `ticket` holds the turn.
    ///
    /// Returns `Aborted` if [`TurnScheduler::abort`] is called first and
    /// `UnknownTicket` if the ticket was never issued, since such a worker
    /// could never be admitted.
    pub fn wait_turn(&self, ticket: TurnTicket) -> Result<TurnPermit<'_>, ScheduleError> {
        let actor = Actor::Worker(ticket);
        self.sink.publish(ChashEvent::Waiting { actor });

        let mut state = self.state.lock();
        if !state.knows(ticket) {
            return Err(ScheduleError::UnknownTicket { ticket });
        }

        loop {
            if state.is_aborted() {
                return Err(ScheduleError::Aborted { ticket });
            }
            if state.is_turn(ticket) {
                break;
            }
            self.turn_changed.wait(&mut state);
        }

        self.sink.publish(ChashEvent::Awakened { actor });
        debug!(%ticket, "Turn granted");

        Ok(TurnPermit {
            scheduler: self,
            ticket,
            completed: false,
        })
    }

    /// Release every waiter with `Aborted`.
    ///
    /// Turns already granted may still complete; no new turn is granted.
    pub fn abort(&self) {
        let mut state = self.state.lock();
        state.abort();
        warn!(active_priority = ?state.active_priority(), "Turn scheduler aborted");
        self.turn_changed.notify_all();
    }

    pub fn active_priority(&self) -> Option<Priority> {
        self.state.lock().active_priority()
    }

    pub fn is_done(&self) -> bool {
        self.state.lock().is_done()
    }

    /// Commands of `priority` that have not started yet.
    pub fn remaining(&self, priority: Priority) -> u32 {
        self.state.lock().remaining(priority)
    }

    fn complete(&self, ticket: TurnTicket) {
        let mut state = self.state.lock();

        match state.complete(ticket) {
            Ok(Advance::SameClass { .. }) => {}
            Ok(Advance::NextClass { from, to }) => {
                debug!(from, to, "Priority class exhausted, advancing");
            }
            Ok(Advance::Done { from }) => {
                info!(last_priority = from, "All priority classes exhausted");
            }
            Err(err) => {
                error!(%err, "Turn completion refused");
            }
        }
        self.turn_changed.notify_all();
    }
}

/// Proof that its holder currently owns the turn.
///
/// Completing the permit, explicitly or by dropping it, hands the turn to
/// the next ticket. Dropping covers early returns and panics, so a failed
/// command can never stall the schedule.
#[must_use = "the turn passes on as soon as the permit is dropped"]
pub struct TurnPermit<'a> {
    scheduler: &'a TurnScheduler,
    ticket: TurnTicket,
    completed: bool,
}

impl TurnPermit<'_> {
    pub fn ticket(&self) -> TurnTicket {
        self.ticket
    }

    /// Report completion of the command.
    pub fn complete(mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        if !self.completed {
            self.completed = true;
            self.scheduler.complete(self.ticket);
        }
    }
}

impl Drop for TurnPermit<'_> {
    fn drop(&mut self) {
        self.finish();
    }
}
