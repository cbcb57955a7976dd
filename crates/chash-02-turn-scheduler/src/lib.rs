//! # CHASH-02: Turn Scheduler
//!
//! Lets one worker per command start and block concurrently while
//! admitting them to the store strictly in `(priority, sequence)` order.
//!
//! ## Protocol
//!
//! 1. `wait_turn(ticket)` publishes `Waiting`, then blocks on a condition
//!    variable until `active_priority == p && next_to_run[p] == s`.
//! 2. The predicate is re-checked after every wake; `Awakened` is published
//!    once it holds.
//! 3. Completing the returned `TurnPermit` advances `next_to_run[p]`, moves
//!    `active_priority` forward when class `p` is exhausted, and wakes every
//!    waiter.
//!
//! ## Architecture
//!
//! - **Domain**: `SchedulerState` (pure transitions), errors, invariants
//! - **Service**: `TurnScheduler` monitor and its `TurnPermit`

pub mod domain;
pub mod service;

pub use domain::errors::ScheduleError;
pub use domain::invariants::invariant_realized_order;
pub use domain::state::SchedulerState;
pub use service::{TurnPermit, TurnScheduler};
