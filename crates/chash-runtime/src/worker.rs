//! # Worker
//!
//! One worker per command: wait for the turn, run exactly one store
//! operation, journal the outcome, hand the turn on. Business failures
//! (`Duplicate`, `NotFound`) are outcomes like any other and never keep
//! the turn from passing.

use chash_01_record_store::{RecordStoreApi, SalaryChange};
use chash_02_turn_scheduler::{ScheduleError, TurnScheduler};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use shared_types::{hash_key, Actor, ChashEvent, Command, CommandKind, EventSink, Key, Record, TurnTicket};
use tracing::debug;

/// What a single command produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommandOutcome {
    Inserted { record: Record },
    DuplicateInsert { key: Key, name: String },
    /// `name` is the name the command asked for; `record` is what was removed.
    Deleted { name: String, record: Record },
    DeleteNotFound { key: Key, name: String },
    Updated { name: String, change: SalaryChange },
    UpdateNotFound { key: Key, name: String },
    Found { record: Record },
    SearchNotFound { key: Key, name: String },
    Printed { records: Vec<Record> },
}

impl CommandOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(
            self,
            CommandOutcome::DuplicateInsert { .. }
                | CommandOutcome::DeleteNotFound { .. }
                | CommandOutcome::UpdateNotFound { .. }
                | CommandOutcome::SearchNotFound { .. }
        )
    }
}

/// A command together with its outcome and execution position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutedCommand {
    /// Logical clock: position of this command's store operation among all
    /// store operations of the run.
    pub tick: u64,
    pub ticket: TurnTicket,
    pub kind: CommandKind,
    pub name: String,
    pub outcome: CommandOutcome,
}

/// Execution-ordered record of finished commands.
///
/// Entries are appended while their worker still holds the turn, so the
/// journal order is the realized execution order.
#[derive(Debug, Default)]
pub struct Journal {
    entries: Mutex<Vec<ExecutedCommand>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, command: &Command, outcome: CommandOutcome) {
        let mut entries = self.entries.lock();
        let tick = entries.len() as u64;
        entries.push(ExecutedCommand {
            tick,
            ticket: command.ticket,
            kind: command.kind,
            name: command.name.clone(),
            outcome,
        });
    }

    pub fn into_entries(self) -> Vec<ExecutedCommand> {
        self.entries.into_inner()
    }
}

/// Shared collaborators a worker needs.
#[derive(Clone, Copy)]
pub struct WorkerContext<'a> {
    pub scheduler: &'a TurnScheduler,
    pub store: &'a dyn RecordStoreApi,
    pub sink: &'a dyn EventSink,
    pub journal: &'a Journal,
}

/// Body of a worker thread.
pub fn run_command(command: &Command, ctx: WorkerContext<'_>) -> Result<(), ScheduleError> {
    let permit = ctx.scheduler.wait_turn(command.ticket)?;

    let outcome = execute(command, ctx.store, ctx.sink);
    debug!(
        ticket = %command.ticket,
        kind = %command.kind,
        success = outcome.is_success(),
        "Command executed"
    );
    ctx.journal.record(command, outcome);

    permit.complete();
    Ok(())
}

/// Run the store operation `command` asks for.
pub fn execute(command: &Command, store: &dyn RecordStoreApi, sink: &dyn EventSink) -> CommandOutcome {
    let actor = Actor::Worker(command.ticket);
    let targeted = command.kind != CommandKind::Print;
    let key = hash_key(&command.name);

    sink.publish(ChashEvent::Operation {
        actor,
        kind: command.kind,
        key: targeted.then_some(key),
        name: targeted.then(|| command.name.clone()),
        salary: command.kind.carries_salary().then_some(command.salary),
    });

    let name = command.name.clone();
    match command.kind {
        CommandKind::Insert => match store.insert(actor, &name, command.salary, key) {
            Ok(record) => CommandOutcome::Inserted { record },
            Err(_) => CommandOutcome::DuplicateInsert { key, name },
        },
        CommandKind::Delete => match store.delete(actor, &name, key) {
            Ok(record) => CommandOutcome::Deleted { name, record },
            Err(_) => CommandOutcome::DeleteNotFound { key, name },
        },
        CommandKind::Update => match store.update(actor, &name, command.salary, key) {
            Ok(change) => CommandOutcome::Updated { name, change },
            Err(_) => CommandOutcome::UpdateNotFound { key, name },
        },
        CommandKind::Search => match store.search(actor, &name, key) {
            Some(record) => CommandOutcome::Found { record },
            None => CommandOutcome::SearchNotFound { key, name },
        },
        CommandKind::Print => CommandOutcome::Printed {
            records: store.snapshot(actor),
        },
    }
}
