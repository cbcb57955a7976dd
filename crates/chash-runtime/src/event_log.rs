//! # Event Log
//!
//! File-backed [`EventSink`] producing one timestamped line per event:
//!
//! ```text
//! 1718000000123456: THREAD 0 WAITING FOR MY TURN
//! 1718000000123501: THREAD 0 AWAKENED FOR WORK
//! 1718000000123530: THREAD 0 INSERT,2195727866,John,100
//! 1718000000123547: THREAD 0 WRITE LOCK ACQUIRE ATTEMPT
//! ```
//!
//! Lines are written under a mutex so they never interleave, and each line
//! is flushed as soon as it is complete.

use parking_lot::Mutex;
use shared_types::{ChashEvent, EventSink};
use std::fs::File;
use std::io::{self, LineWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

/// Render the text part of a log line.
pub fn format_event(event: &ChashEvent) -> String {
    match event {
        ChashEvent::Waiting { .. } => "WAITING FOR MY TURN".to_string(),
        ChashEvent::Awakened { .. } => "AWAKENED FOR WORK".to_string(),
        ChashEvent::AccessRequested { mode, .. } => format!("{} LOCK ACQUIRE ATTEMPT", mode.label()),
        ChashEvent::AccessAcquired { mode, .. } => format!("{} LOCK ACQUIRED", mode.label()),
        ChashEvent::AccessReleased { mode, .. } => format!("{} LOCK RELEASED", mode.label()),
        ChashEvent::Operation {
            kind,
            key,
            name,
            salary,
            ..
        } => {
            let mut text = kind.label().to_string();
            if let Some(key) = key {
                text.push_str(&format!(",{key}"));
            }
            if let Some(name) = name {
                text.push(',');
                text.push_str(name);
            }
            if let Some(salary) = salary {
                text.push_str(&format!(",{salary}"));
            }
            text
        }
    }
}

/// Render a full log line, without the trailing newline.
pub fn format_line(timestamp_micros: i64, event: &ChashEvent) -> String {
    format!(
        "{timestamp_micros}: THREAD {} {}",
        event.actor().log_id(),
        format_event(event)
    )
}

/// Append-only event log file.
pub struct TimestampedLog {
    path: PathBuf,
    writer: Mutex<LineWriter<File>>,
    write_failed: AtomicBool,
}

impl TimestampedLog {
    /// Create (or truncate) the log file at `path`.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        debug!(path = %path.display(), "Event log opened");

        Ok(Self {
            path,
            writer: Mutex::new(LineWriter::new(file)),
            write_failed: AtomicBool::new(false),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush anything still buffered.
    pub fn flush(&self) -> io::Result<()> {
        self.writer.lock().flush()
    }
}

impl EventSink for TimestampedLog {
    fn publish(&self, event: ChashEvent) {
        let mut writer = self.writer.lock();
        let line = format_line(chrono::Utc::now().timestamp_micros(), &event);

        if let Err(err) = writeln!(writer, "{line}") {
            // One warning per run is enough; the run itself carries on.
            if !self.write_failed.swap(true, Ordering::Relaxed) {
                warn!(path = %self.path.display(), %err, "Failed to write event log");
            }
        }
    }
}
