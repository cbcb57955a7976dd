//! Cross-crate integration tests.

pub mod event_log;
pub mod ordering;
pub mod scenarios;

use chash_01_record_store::SortedRecordStore;
use chash_runtime::{parse_commands, Dispatcher, RunReport};
use shared_types::{EventSink, NoopSink};
use std::sync::Arc;

/// Parse `text` and run it against a fresh store, publishing to `sink`.
pub fn run_text_with_sink(text: &str, sink: Arc<dyn EventSink>) -> RunReport {
    let batch = parse_commands(text, true);
    let store = Arc::new(SortedRecordStore::with_sink(Arc::clone(&sink)));
    Dispatcher::new(store, sink)
        .run(&batch.commands)
        .unwrap_or_else(|err| panic!("run failed: {err}"))
}

/// Parse `text` and run it against a fresh store without event capture.
pub fn run_text(text: &str) -> RunReport {
    run_text_with_sink(text, Arc::new(NoopSink))
}
