//! Apply command implementation.
//!
//! A script is a JSON array of steps, applied in order to one stream:
//!
//! ```json
//! [
//!   { "op": "insert", "offset": 4, "text": "new" },
//!   { "op": "write",  "offset": 0, "hex": "7f454c46" },
//!   { "op": "remove", "offset": 20, "length": 8 }
//! ]
//! ```
//!
//! Each offset refers to the content as left by the previous steps.

use super::edit::{open_stream, Edit, Payload};
use crate::error::{CliError, CliResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Kind of a script step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Op {
    /// Insert bytes.
    Insert,
    /// Remove bytes.
    Remove,
    /// Overwrite bytes.
    Write,
}

/// One step of an edit script, as written in JSON.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    /// What the step does.
    pub op: Op,
    /// Where it applies.
    pub offset: u64,
    /// Payload as UTF-8 text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Payload as hex digits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
    /// Length of a removal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u64>,
}

impl Step {
    /// Checks the step's fields and turns it into an [`Edit`].
    pub fn into_edit(self, index: usize) -> CliResult<Edit> {
        let invalid = |message: &str| CliError::InvalidStep {
            index,
            message: message.to_string(),
        };

        match self.op {
            Op::Remove => {
                if self.text.is_some() || self.hex.is_some() {
                    return Err(invalid("remove takes a length, not a payload"));
                }
                let length = self.length.ok_or_else(|| invalid("remove needs a length"))?;
                Ok(Edit::Remove {
                    offset: self.offset,
                    length,
                })
            }
            Op::Insert | Op::Write => {
                if self.length.is_some() {
                    return Err(invalid("length only applies to remove"));
                }
                let bytes = Payload::from_args(self.text, self.hex)
                    .map_err(|_| invalid("needs exactly one of text or hex"))?
                    .into_bytes()?;
                if bytes.is_empty() {
                    return Err(invalid("payload is empty"));
                }
                Ok(if self.op == Op::Insert {
                    Edit::Insert {
                        offset: self.offset,
                        bytes,
                    }
                } else {
                    Edit::Write {
                        offset: self.offset,
                        bytes,
                    }
                })
            }
        }
    }
}

/// Outcome of running a script.
#[derive(Debug, Serialize)]
pub struct ApplySummary {
    /// Number of steps applied.
    pub steps: usize,
    /// File size before editing.
    pub size_before: u64,
    /// File size after editing.
    pub size_after: u64,
    /// Whether the file was written.
    pub committed: bool,
}

/// Parses a script.
pub fn parse_script(json: &str) -> CliResult<Vec<Edit>> {
    let steps: Vec<Step> = serde_json::from_str(json)?;
    steps
        .into_iter()
        .enumerate()
        .map(|(index, step)| step.into_edit(index))
        .collect()
}

/// Runs the apply command.
pub fn run(path: &Path, script: &Path, dry_run: bool) -> Result<(), Box<dyn std::error::Error>> {
    info!("Applying {:?} to {:?}", script, path);

    let edits = parse_script(&std::fs::read_to_string(script).map_err(CliError::from)?)?;
    let summary = apply(path, &edits, dry_run)?;

    if !summary.committed {
        println!("(dry run - no changes were made)");
    }
    println!("Steps applied: {}", summary.steps);
    println!("Size before:   {} bytes", summary.size_before);
    println!("Size after:    {} bytes", summary.size_after);
    Ok(())
}

/// Applies `edits` to the file at `path`, committing unless `dry_run`.
pub fn apply(path: &Path, edits: &[Edit], dry_run: bool) -> CliResult<ApplySummary> {
    let mut stream = open_stream(path)?;
    let size_before = stream.len();

    for (index, edit) in edits.iter().enumerate() {
        edit.apply(&mut stream).map_err(|err| CliError::InvalidStep {
            index,
            message: err.to_string(),
        })?;
    }

    let size_after = stream.len();
    if !dry_run {
        stream.commit()?;
    }

    Ok(ApplySummary {
        steps: edits.len(),
        size_before,
        size_after,
        committed: !dry_run,
    })
}
