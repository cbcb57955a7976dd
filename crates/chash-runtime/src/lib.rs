//! # CHASH Runtime
//!
//! Wires the record store and the turn scheduler into a batch runner.
//!
//! ## Run Sequence
//!
//! 1. Load configuration (environment, then CLI flags) and recreate the
//!    event log
//! 2. Parse the command file; malformed lines are discarded with a warning
//! 3. Assign FIFO sequence numbers per priority class
//! 4. Spawn one worker thread per command; each waits for its turn,
//!    performs one store operation and hands the turn on
//! 5. Join all workers and dump the final store contents
//!
//! ## Modules
//!
//! - `config` - `RuntimeConfig` and output format
//! - `parser` / `sequencer` - command file to sequenced `Command`s
//! - `worker` - per-command execution and `CommandOutcome`
//! - `dispatcher` - spawns and joins workers, produces the `RunReport`
//! - `event_log` - timestamped `hash.log` writer
//! - `report` - result line rendering
//! - `session` - one full run: event log, command file, dispatch, results

pub mod config;
pub mod dispatcher;
pub mod event_log;
pub mod parser;
pub mod report;
pub mod sequencer;
pub mod session;
pub mod worker;

pub use config::{OutputFormat, RuntimeConfig};
pub use dispatcher::{DispatchError, Dispatcher, RunReport};
pub use event_log::TimestampedLog;
pub use parser::{parse_commands, ParseError, ParsedBatch};
pub use session::{run_session, SessionError};
pub use worker::{CommandOutcome, ExecutedCommand};
