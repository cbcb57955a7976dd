//! Domain invariants for the Record Store

use shared_types::Record;

/// INVARIANT-1: Ordering
/// Records are in strictly ascending key order, which also rules out
/// duplicate keys.
pub fn invariant_strictly_ascending(records: &[Record]) -> bool {
    records.windows(2).all(|pair| pair[0].key < pair[1].key)
}
