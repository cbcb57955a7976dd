//! Error types for the Turn Scheduler

use shared_types::{Priority, Sequence, TurnTicket};
use thiserror::Error;

/// All errors that can occur while building or driving a schedule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// Sequences of a priority class do not form `0..count`.
    #[error("Sequence gap in priority {priority}: expected {expected}, found {found}")]
    SequenceGap {
        priority: Priority,
        expected: Sequence,
        found: Sequence,
    },

    /// The same ticket was issued twice.
    #[error("Duplicate ticket {ticket}")]
    DuplicateTicket { ticket: TurnTicket },

    /// The ticket was not part of the batch the scheduler was built from.
    #[error("Unknown ticket {ticket}")]
    UnknownTicket { ticket: TurnTicket },

    /// Completion reported for a ticket that does not hold the turn.
    #[error("{ticket} completed out of turn")]
    OutOfTurn { ticket: TurnTicket },

    /// The run was aborted while the ticket was still waiting.
    #[error("Run aborted before {ticket} got its turn")]
    Aborted { ticket: TurnTicket },
}
