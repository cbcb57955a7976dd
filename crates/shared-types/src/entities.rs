//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Store**: `Record`, `Key`
//! - **Commands**: `Command`, `CommandKind`, `TurnTicket`
//! - **Attribution**: `Actor`, the party an event or store access belongs to

use serde::{Deserialize, Serialize};
use std::fmt;

/// 32-bit record key derived from the record name by [`crate::hash_key`].
pub type Key = u32;

/// Priority class of a command. Lower classes run first.
pub type Priority = u32;

/// FIFO rank of a command inside its priority class.
pub type Sequence = u32;

/// Width of the name buffer in the reference output format, excluding the
/// terminator.
pub const MAX_NAME_LEN: usize = 49;

// =============================================================================
// STORE
// =============================================================================

/// A single employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Hash of `name`; the sole identity of the record.
    pub key: Key,
    /// Display name.
    pub name: String,
    /// Salary in whole currency units.
    pub salary: u32,
}

impl Record {
    pub fn new(key: Key, name: impl Into<String>, salary: u32) -> Self {
        Self {
            key,
            name: name.into(),
            salary,
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.key, self.name, self.salary)
    }
}

// =============================================================================
// COMMANDS
// =============================================================================

/// The five operations a command can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    Insert,
    Delete,
    Update,
    Search,
    Print,
}

impl CommandKind {
    /// Upper-case label used in the event log.
    pub fn label(self) -> &'static str {
        match self {
            CommandKind::Insert => "INSERT",
            CommandKind::Delete => "DELETE",
            CommandKind::Update => "UPDATE",
            CommandKind::Search => "SEARCH",
            CommandKind::Print => "PRINT",
        }
    }

    /// Whether the command needs exclusive store access.
    pub fn is_mutation(self) -> bool {
        matches!(
            self,
            CommandKind::Insert | CommandKind::Delete | CommandKind::Update
        )
    }

    /// Whether the salary field of the command is meaningful.
    pub fn carries_salary(self) -> bool {
        matches!(self, CommandKind::Insert | CommandKind::Update)
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Position of a command in the global execution order.
///
/// Derived ordering is `(priority, sequence)`, which is exactly the order
/// the scheduler realizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TurnTicket {
    pub priority: Priority,
    pub sequence: Sequence,
}

impl TurnTicket {
    pub fn new(priority: Priority, sequence: Sequence) -> Self {
        Self { priority, sequence }
    }
}

impl fmt::Display for TurnTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}-s{}", self.priority, self.sequence)
    }
}

/// A fully sequenced command, ready to be handed to a worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub kind: CommandKind,
    /// Target name; empty for `Print`.
    pub name: String,
    /// New or initial salary; zero unless `kind.carries_salary()`.
    pub salary: u32,
    pub ticket: TurnTicket,
    /// 1-based line of the command in its source, if it came from one.
    pub line: Option<usize>,
}

impl Command {
    pub fn new(kind: CommandKind, name: impl Into<String>, salary: u32, ticket: TurnTicket) -> Self {
        Self {
            kind,
            name: name.into(),
            salary,
            ticket,
            line: None,
        }
    }

    pub fn insert(name: &str, salary: u32, priority: Priority, sequence: Sequence) -> Self {
        Self::new(
            CommandKind::Insert,
            name,
            salary,
            TurnTicket::new(priority, sequence),
        )
    }

    pub fn delete(name: &str, priority: Priority, sequence: Sequence) -> Self {
        Self::new(CommandKind::Delete, name, 0, TurnTicket::new(priority, sequence))
    }

    pub fn update(name: &str, salary: u32, priority: Priority, sequence: Sequence) -> Self {
        Self::new(
            CommandKind::Update,
            name,
            salary,
            TurnTicket::new(priority, sequence),
        )
    }

    pub fn search(name: &str, priority: Priority, sequence: Sequence) -> Self {
        Self::new(CommandKind::Search, name, 0, TurnTicket::new(priority, sequence))
    }

    pub fn print(priority: Priority, sequence: Sequence) -> Self {
        Self::new(CommandKind::Print, "", 0, TurnTicket::new(priority, sequence))
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn priority(&self) -> Priority {
        self.ticket.priority
    }

    pub fn sequence(&self) -> Sequence {
        self.ticket.sequence
    }
}

// =============================================================================
// ATTRIBUTION
// =============================================================================

/// Who is acting on the store or scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Actor {
    /// A worker executing the command holding this ticket.
    Worker(TurnTicket),
    /// The dispatcher itself, e.g. for the end-of-run dump.
    Driver,
}

impl Actor {
    /// Numeric tag printed as `THREAD <id>` in the event log.
    ///
    /// Workers are tagged with their priority; the driver with `-1`.
    pub fn log_id(self) -> i64 {
        match self {
            Actor::Worker(ticket) => i64::from(ticket.priority),
            Actor::Driver => -1,
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Actor::Worker(ticket) => write!(f, "worker-{ticket}"),
            Actor::Driver => f.write_str("driver"),
        }
    }
}
