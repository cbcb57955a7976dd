//! Domain invariants for the Turn Scheduler

use shared_types::TurnTicket;
use std::collections::BTreeSet;

/// INVARIANT-1: Total Order
/// Turns were granted in strictly ascending `(priority, sequence)` order.
pub fn invariant_realized_order(executed: &[TurnTicket]) -> bool {
    executed.windows(2).all(|pair| pair[0] < pair[1])
}

/// INVARIANT-2: Completeness
/// Every issued ticket got exactly one turn.
pub fn invariant_all_granted(executed: &[TurnTicket], issued: &[TurnTicket]) -> bool {
    let granted: BTreeSet<TurnTicket> = executed.iter().copied().collect();
    let expected: BTreeSet<TurnTicket> = issued.iter().copied().collect();
    granted.len() == executed.len() && granted == expected
}
