//! FIFO sequence assignment.

use shared_types::{Command, CommandKind, Priority, TurnTicket};
use std::collections::HashMap;

/// A parsed command that has not been placed in the execution order yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsequencedCommand {
    pub kind: CommandKind,
    pub name: String,
    pub salary: u32,
    pub priority: Priority,
    /// 1-based source line.
    pub line: usize,
}

/// Number commands `0..n` within each priority class, in input order.
///
/// Input order is the FIFO tie-break, so the returned commands keep the
/// order they were given in.
pub fn assign_sequences(commands: Vec<UnsequencedCommand>) -> Vec<Command> {
    let mut next_sequence: HashMap<Priority, u32> = HashMap::new();

    commands
        .into_iter()
        .map(|pending| {
            let counter = next_sequence.entry(pending.priority).or_insert(0);
            let ticket = TurnTicket::new(pending.priority, *counter);
            *counter += 1;
            Command::new(pending.kind, pending.name, pending.salary, ticket).with_line(pending.line)
        })
        .collect()
}
