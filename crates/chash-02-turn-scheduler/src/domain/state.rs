//! Scheduler state and its transitions.
//!
//! Everything here is single-threaded; the service wraps it in a monitor.

use super::errors::ScheduleError;
use serde::{Deserialize, Serialize};
use shared_types::{Priority, Sequence, TurnTicket};
use std::collections::BTreeMap;
use std::ops::Bound;

/// Progress of one priority class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lane {
    /// Number of commands in the class.
    pub total: u32,
    /// Sequence number eligible to run next.
    pub next_to_run: Sequence,
}

impl Lane {
    /// Commands of this class that have not started yet.
    pub fn remaining(&self) -> u32 {
        self.total.saturating_sub(self.next_to_run)
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}

/// Outcome of completing a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The same class continues with its next sequence.
    SameClass { priority: Priority, next: Sequence },
    /// The class was exhausted and the next populated class became active.
    NextClass { from: Priority, to: Priority },
    /// The last class was exhausted.
    Done { from: Priority },
}

/// Whose turn it is.
///
/// `active` is the single source of truth: it starts at the smallest
/// populated priority, only ever increases, and once `None` stays `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerState {
    active: Option<Priority>,
    lanes: BTreeMap<Priority, Lane>,
    aborted: bool,
}

impl SchedulerState {
    /// Build the state for a complete batch of tickets.
    ///
    /// Sequences must be exactly `0..count` within every priority; anything
    /// else would leave some worker waiting forever.
    pub fn from_tickets<'a, I>(tickets: I) -> Result<Self, ScheduleError>
    where
        I: IntoIterator<Item = &'a TurnTicket>,
    {
        let mut by_priority: BTreeMap<Priority, Vec<Sequence>> = BTreeMap::new();
        for ticket in tickets {
            by_priority
                .entry(ticket.priority)
                .or_default()
                .push(ticket.sequence);
        }

        let mut lanes = BTreeMap::new();
        for (priority, mut sequences) in by_priority {
            sequences.sort_unstable();
            if let Some(pair) = sequences.windows(2).find(|pair| pair[0] == pair[1]) {
                return Err(ScheduleError::DuplicateTicket {
                    ticket: TurnTicket::new(priority, pair[0]),
                });
            }
            for (expected, &found) in (0..).zip(sequences.iter()) {
                if found != expected {
                    return Err(ScheduleError::SequenceGap {
                        priority,
                        expected,
                        found,
                    });
                }
            }
            let total = u32::try_from(sequences.len()).unwrap_or(u32::MAX);
            lanes.insert(
                priority,
                Lane {
                    total,
                    next_to_run: 0,
                },
            );
        }

        Ok(Self {
            active: lanes.keys().next().copied(),
            lanes,
            aborted: false,
        })
    }

    pub fn active_priority(&self) -> Option<Priority> {
        self.active
    }

    pub fn is_done(&self) -> bool {
        self.active.is_none()
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// Commands of `priority` that have not started yet.
    pub fn remaining(&self, priority: Priority) -> u32 {
        self.lanes.get(&priority).map_or(0, Lane::remaining)
    }

    /// Whether `ticket` belongs to this batch.
    pub fn knows(&self, ticket: TurnTicket) -> bool {
        self.lanes
            .get(&ticket.priority)
            .is_some_and(|lane| ticket.sequence < lane.total)
    }

    /// The turn predicate.
    pub fn is_turn(&self, ticket: TurnTicket) -> bool {
        self.active == Some(ticket.priority)
            && self
                .lanes
                .get(&ticket.priority)
                .is_some_and(|lane| lane.next_to_run == ticket.sequence)
    }

    /// The ticket currently eligible to run, if any.
    pub fn current_turn(&self) -> Option<TurnTicket> {
        let priority = self.active?;
        let lane = self.lanes.get(&priority)?;
        Some(TurnTicket::new(priority, lane.next_to_run))
    }

    pub(crate) fn abort(&mut self) {
        self.aborted = true;
    }

    /// Record that `ticket`, which must hold the current turn, has finished.
    ///
    /// Any other ticket is refused with `OutOfTurn` and leaves the state
    /// untouched.
    pub fn complete(&mut self, ticket: TurnTicket) -> Result<Advance, ScheduleError> {
        if self.current_turn() != Some(ticket) {
            return Err(ScheduleError::OutOfTurn { ticket });
        }
        let priority = ticket.priority;
        let Some(lane) = self.lanes.get_mut(&priority) else {
            return Err(ScheduleError::UnknownTicket { ticket });
        };
        lane.next_to_run += 1;
        if !lane.is_exhausted() {
            return Ok(Advance::SameClass {
                priority,
                next: lane.next_to_run,
            });
        }

        self.active = self
            .lanes
            .range((Bound::Excluded(priority), Bound::Unbounded))
            .find(|(_, lane)| !lane.is_exhausted())
            .map(|(next, _)| *next);

        Ok(match self.active {
            Some(to) => Advance::NextClass { from: priority, to },
            None => Advance::Done { from: priority },
        })
    }
}
