//! # Command File Parser
//!
//! One command per line, comma separated, fields trimmed:
//!
//! ```text
//! threads,4,0
//! insert,John,50000,1
//! update,John,60000,2
//! delete,John,3
//! search,John,0
//! print,0
//! ```
//!
//! The kind is case-insensitive, the last field is always the priority and
//! the second-to-last the salary for `insert`/`update`. A leading `threads`
//! line is a header and is ignored. Blank lines are skipped. Lines that
//! cannot be classified are discarded with a warning; the rest of the file
//! is still used.

use crate::sequencer::{assign_sequences, UnsequencedCommand};
use shared_types::{Command, CommandKind, Priority, MAX_NAME_LEN};
use thiserror::Error;
use tracing::{debug, warn};

/// A line that could not be turned into a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: malformed command '{text}': {reason}")]
    MalformedCommand {
        line: usize,
        text: String,
        reason: String,
    },
}

impl ParseError {
    fn malformed(line: usize, text: &str, reason: impl Into<String>) -> Self {
        ParseError::MalformedCommand {
            line,
            text: text.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result of parsing a whole command file.
#[derive(Debug, Clone, Default)]
pub struct ParsedBatch {
    /// Accepted commands in input order, sequenced per priority.
    pub commands: Vec<Command>,
    /// Discarded lines.
    pub rejected: Vec<ParseError>,
}

/// Parse and sequence a command file.
pub fn parse_commands(text: &str, truncate_names: bool) -> ParsedBatch {
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        match parse_line(line, raw, truncate_names) {
            Ok(Some(command)) => accepted.push(command),
            Ok(None) => {}
            Err(err) => {
                warn!(%err, "Skipping unparsable line");
                rejected.push(err);
            }
        }
    }

    debug!(
        accepted = accepted.len(),
        rejected = rejected.len(),
        "Command file parsed"
    );

    ParsedBatch {
        commands: assign_sequences(accepted),
        rejected,
    }
}

/// Parse one line. `Ok(None)` means the line carries no command.
pub fn parse_line(
    line: usize,
    raw: &str,
    truncate_names: bool,
) -> Result<Option<UnsequencedCommand>, ParseError> {
    let text = raw.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let fields: Vec<&str> = text.split(',').map(str::trim).collect();
    let head = fields[0].to_ascii_lowercase();
    if head == "threads" {
        return Ok(None);
    }

    let (kind, min_fields) = match head.as_str() {
        "insert" => (CommandKind::Insert, 4),
        "update" => (CommandKind::Update, 4),
        "delete" => (CommandKind::Delete, 3),
        "search" => (CommandKind::Search, 3),
        "print" => (CommandKind::Print, 1),
        _ => return Err(ParseError::malformed(line, text, "unknown command")),
    };

    if fields.len() < min_fields {
        return Err(ParseError::malformed(
            line,
            text,
            format!("expected at least {min_fields} fields, found {}", fields.len()),
        ));
    }

    let priority = if kind == CommandKind::Print && fields.len() == 1 {
        0
    } else {
        parse_priority(fields[fields.len() - 1])
            .ok_or_else(|| ParseError::malformed(line, text, "invalid priority"))?
    };

    let salary = if kind.carries_salary() {
        fields[fields.len() - 2]
            .parse::<u32>()
            .map_err(|_| ParseError::malformed(line, text, "invalid salary"))?
    } else {
        0
    };

    let name = if kind == CommandKind::Print {
        String::new()
    } else {
        let name = fields[1];
        if name.is_empty() {
            return Err(ParseError::malformed(line, text, "missing name"));
        }
        if truncate_names {
            truncate_name(name).to_string()
        } else {
            name.to_string()
        }
    };

    Ok(Some(UnsequencedCommand {
        kind,
        name,
        salary,
        priority,
        line,
    }))
}

fn parse_priority(field: &str) -> Option<Priority> {
    field.parse::<Priority>().ok()
}

/// Longest prefix of `name` that fits in `MAX_NAME_LEN` bytes without
/// splitting a character.
pub fn truncate_name(name: &str) -> &str {
    if name.len() <= MAX_NAME_LEN {
        return name;
    }
    let mut end = MAX_NAME_LEN;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}
