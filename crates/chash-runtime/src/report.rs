//! Result line rendering for a finished run.

use crate::config::OutputFormat;
use crate::dispatcher::RunReport;
use crate::worker::CommandOutcome;
use serde::Serialize;
use shared_types::Record;
use std::fmt;
use std::io::{self, Write};

const DATABASE_HEADER: &str = "Current Database:";

impl fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandOutcome::Inserted { record } => write!(f, "Inserted {record}"),
            CommandOutcome::DuplicateInsert { key, .. } => {
                write!(f, "Insert failed. Entry {key} is a duplicate.")
            }
            CommandOutcome::Deleted { name, record } => write!(
                f,
                "Deleted record for {},{name},{}",
                record.key, record.salary
            ),
            CommandOutcome::DeleteNotFound { name, .. }
            | CommandOutcome::SearchNotFound { name, .. } => write!(f, "{name} not found."),
            CommandOutcome::Updated { name, change } => {
                let key = change.after.key;
                write!(
                    f,
                    "Updated record {key} from {key},{name},{} to {key},{name},{}",
                    change.old_salary(),
                    change.new_salary()
                )
            }
            CommandOutcome::UpdateNotFound { key, .. } => {
                write!(f, "Update failed. Entry {key} not found.")
            }
            CommandOutcome::Found { record } => write!(f, "Found: {record}"),
            CommandOutcome::Printed { records } => write_database(f, records),
        }
    }
}

fn write_database(f: &mut fmt::Formatter<'_>, records: &[Record]) -> fmt::Result {
    f.write_str(DATABASE_HEADER)?;
    for record in records {
        write!(f, "\n{record}")?;
    }
    Ok(())
}

#[derive(Serialize)]
struct FinalSnapshot<'a> {
    final_snapshot: &'a [Record],
}

/// Write every outcome in execution order, then the final store dump.
pub fn write_report<W: Write>(out: &mut W, report: &RunReport, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            for entry in &report.executed {
                writeln!(out, "{}", entry.outcome)?;
            }
            writeln!(out, "{DATABASE_HEADER}")?;
            for record in &report.final_snapshot {
                writeln!(out, "{record}")?;
            }
        }
        OutputFormat::Json => {
            for entry in &report.executed {
                serde_json::to_writer(&mut *out, entry)?;
                writeln!(out)?;
            }
            let dump = FinalSnapshot {
                final_snapshot: &report.final_snapshot,
            };
            serde_json::to_writer(&mut *out, &dump)?;
            writeln!(out)?;
        }
    }
    out.flush()
}
