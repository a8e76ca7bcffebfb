//! Per-row change log for column transforms.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::value::Value;

/// A single changed cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Name of the identifier column.
    pub id_column: String,
    /// Identifier of the changed row.
    pub id: Value,
    /// Column that was changed.
    pub column: String,
    /// Value before the transform.
    pub old: Value,
    /// Value after the transform.
    pub new: Value,
}

impl fmt::Display for ChangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' = {}, '{}': {} >> {}",
            self.id_column, self.id, self.column, self.old, self.new
        )
    }
}

/// Which (old, new) pairs are excluded from the log before comparing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPolicy {
    /// Skip rows where either the old or the new value is missing.
    SkipEither,
    /// Skip rows where the old value is missing; missing new values are logged.
    SkipOld,
}

impl MissingPolicy {
    fn skips(self, old: &Value, new: &Value) -> bool {
        match self {
            MissingPolicy::SkipEither => old.is_missing() || new.is_missing(),
            MissingPolicy::SkipOld => old.is_missing(),
        }
    }
}

/// Append-only log of cell changes, owned by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangeLog {
    records: Vec<ChangeRecord>,
}

impl ChangeLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record.
    pub fn push(&mut self, record: ChangeRecord) {
        self.records.push(record);
    }

    /// Append every record from another log, preserving order.
    pub fn extend(&mut self, other: ChangeLog) {
        self.records.extend(other.records);
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in append order.
    pub fn records(&self) -> &[ChangeRecord] {
        &self.records
    }

    /// Rendered log lines in append order.
    pub fn lines(&self) -> Vec<String> {
        self.records.iter().map(|r| r.to_string()).collect()
    }

    /// Consume the log, returning the rendered lines.
    pub fn into_lines(self) -> Vec<String> {
        self.lines()
    }

    /// Serialize the records as a JSON array.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }
}

/// Compare an old and a new column row by row and collect the changes.
///
/// Pairs excluded by `policy` are dropped first; of the rest, every row whose
/// values differ produces a record.
pub fn diff_column(
    ids: &[Value],
    old: &[Value],
    new: &[Value],
    id_column: &str,
    column: &str,
    policy: MissingPolicy,
) -> Vec<ChangeRecord> {
    ids.iter()
        .zip(old)
        .zip(new)
        .filter(|((_, o), n)| !policy.skips(o, n))
        .filter(|((_, o), n)| o != n)
        .map(|((id, o), n)| ChangeRecord {
            id_column: id_column.to_string(),
            id: id.clone(),
            column: column.to_string(),
            old: o.clone(),
            new: n.clone(),
        })
        .collect()
}
