//! # Dispatcher
//!
//! Spawns one worker thread per command, joins them all, then takes the
//! end-of-run snapshot as the driver.

use crate::worker::{run_command, ExecutedCommand, Journal, WorkerContext};
use chash_01_record_store::RecordStoreApi;
use chash_02_turn_scheduler::{ScheduleError, TurnScheduler};
use serde::{Deserialize, Serialize};
use shared_types::{Actor, Command, EventSink, Record, TurnTicket};
use std::io;
use std::sync::Arc;
use std::thread;
use thiserror::Error;
use tracing::{error, info, warn};

/// Fatal run failures.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The command batch cannot be scheduled.
    #[error("Invalid schedule: {0}")]
    Schedule(#[from] ScheduleError),

    /// A worker thread could not be created; the run was aborted.
    #[error("Failed to spawn worker for {ticket}: {source}")]
    ResourceExhausted {
        ticket: TurnTicket,
        #[source]
        source: io::Error,
    },

    /// A worker panicked while holding its turn.
    #[error("Worker {ticket} panicked")]
    WorkerPanicked { ticket: TurnTicket },
}

/// Everything a run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Executed commands in realized execution order.
    pub executed: Vec<ExecutedCommand>,
    /// Store contents after every worker finished.
    pub final_snapshot: Vec<Record>,
}

impl RunReport {
    /// Tickets in the order they executed.
    pub fn execution_order(&self) -> Vec<TurnTicket> {
        self.executed.iter().map(|entry| entry.ticket).collect()
    }
}

/// Batch runner over a shared store.
pub struct Dispatcher {
    store: Arc<dyn RecordStoreApi>,
    sink: Arc<dyn EventSink>,
    worker_limit: usize,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn RecordStoreApi>, sink: Arc<dyn EventSink>) -> Self {
        Self {
            store,
            sink,
            worker_limit: usize::MAX,
        }
    }

    /// Cap the number of worker threads a run may create.
    ///
    /// A batch larger than the cap fails the same way as an OS refusal to
    /// create a thread.
    pub fn with_worker_limit(mut self, limit: usize) -> Self {
        self.worker_limit = limit;
        self
    }

    /// Execute a fully sequenced batch.
    ///
    /// Returns once every worker has finished. Store-level failures are
    /// part of the report; only scheduling, spawning and panics are errors.
    pub fn run(&self, commands: &[Command]) -> Result<RunReport, DispatchError> {
        let tickets: Vec<TurnTicket> = commands.iter().map(|command| command.ticket).collect();
        let scheduler = TurnScheduler::with_sink(&tickets, Arc::clone(&self.sink))?;
        let journal = Journal::new();

        info!(commands = commands.len(), "Dispatching workers");

        let ctx = WorkerContext {
            scheduler: &scheduler,
            store: self.store.as_ref(),
            sink: self.sink.as_ref(),
            journal: &journal,
        };

        let outcome = thread::scope(|scope| {
            let mut handles = Vec::with_capacity(commands.len());

            for command in commands {
                let spawned = if handles.len() >= self.worker_limit {
                    Err(io::Error::new(
                        io::ErrorKind::WouldBlock,
                        format!("worker limit of {} reached", self.worker_limit),
                    ))
                } else {
                    thread::Builder::new()
                        .name(format!("worker-{}", command.ticket))
                        .spawn_scoped(scope, move || run_command(command, ctx))
                };

                match spawned {
                    Ok(handle) => handles.push((command.ticket, handle)),
                    Err(source) => {
                        error!(ticket = %command.ticket, %source, "Worker spawn failed, aborting run");
                        scheduler.abort();
                        return Err(DispatchError::ResourceExhausted {
                            ticket: command.ticket,
                            source,
                        });
                    }
                }
            }

            let mut first_failure = None;
            for (ticket, handle) in handles {
                match handle.join() {
                    Ok(Ok(())) => {}
                    Ok(Err(err)) => {
                        warn!(%ticket, %err, "Worker did not run");
                        first_failure.get_or_insert(DispatchError::Schedule(err));
                    }
                    Err(_) => {
                        error!(%ticket, "Worker panicked");
                        first_failure.get_or_insert(DispatchError::WorkerPanicked { ticket });
                    }
                }
            }

            first_failure.map_or(Ok(()), Err)
        });
        outcome?;

        let final_snapshot = self.store.snapshot(Actor::Driver);
        let executed = journal.into_entries();

        info!(
            executed = executed.len(),
            records = final_snapshot.len(),
            "All workers finished"
        );

        Ok(RunReport {
            executed,
            final_snapshot,
        })
    }
}
