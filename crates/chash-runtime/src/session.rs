//! # Session
//!
//! One complete run of the `chash` binary: open the event log, read and
//! parse the command file, dispatch, then write the results.
//!
//! The event log is (re)created before the command file is touched, so a
//! run that finds no commands, or no command file, never leaves an earlier
//! run's trace behind.

use crate::config::RuntimeConfig;
use crate::dispatcher::{DispatchError, Dispatcher, RunReport};
use crate::event_log::TimestampedLog;
use crate::parser::parse_commands;
use crate::report::write_report;
use chash_01_record_store::SortedRecordStore;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to open event log {}: {source}", path.display())]
    EventLog {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read command file {}: {source}", path.display())]
    Commands {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("Failed to write results: {0}")]
    Output(#[source] io::Error),
}

/// Run the batch described by `config`, writing results to `out`.
///
/// Returns `None` when the command file holds no commands.
pub fn run_session<W: Write>(
    config: &RuntimeConfig,
    out: &mut W,
) -> Result<Option<RunReport>, SessionError> {
    let log_error = |source| SessionError::EventLog {
        path: config.log_path.clone(),
        source,
    };
    let log = Arc::new(TimestampedLog::create(&config.log_path).map_err(log_error)?);

    let text = std::fs::read_to_string(&config.commands_path).map_err(|source| {
        SessionError::Commands {
            path: config.commands_path.clone(),
            source,
        }
    })?;

    let batch = parse_commands(&text, config.truncate_names);
    if !batch.rejected.is_empty() {
        warn!(rejected = batch.rejected.len(), "Some command lines were discarded");
    }
    if batch.commands.is_empty() {
        warn!(path = %config.commands_path.display(), "No commands found");
        return Ok(None);
    }

    let store = Arc::new(SortedRecordStore::with_sink(log.clone()));
    let dispatcher = Dispatcher::new(store, log.clone());

    info!(commands = batch.commands.len(), "Starting run");
    let report = dispatcher.run(&batch.commands)?;
    log.flush().map_err(log_error)?;

    write_report(out, &report, config.output).map_err(SessionError::Output)?;
    info!(executed = report.executed.len(), "Run complete");

    Ok(Some(report))
}
