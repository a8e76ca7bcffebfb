//! Transformation operations that can be applied to a table.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::impute::Range;
use crate::replace::MatchMode;
use crate::value::Value;

/// A column transformation step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ColumnTransform {
    /// Replace values in a column based on an ordered pattern mapping.
    Replace {
        column: String,
        mapping: IndexMap<String, Value>,
        /// Overrides the engine's match mode when set.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mode: Option<MatchMode>,
    },

    /// Convert values outside a range to missing.
    ImputeRange { column: String, range: Range },

    /// Convert listed values to missing.
    ImputeValues {
        column: String,
        nan_values: Vec<Value>,
    },

    /// Move dates into the year held by another column.
    ImputeYear {
        column: String,
        year_column: String,
    },

    /// Move dates from one year into another.
    ReplaceYear {
        column: String,
        new_year: i32,
        old_year: i32,
    },
}

impl ColumnTransform {
    /// Column the transformation rewrites.
    pub fn column(&self) -> &str {
        match self {
            ColumnTransform::Replace { column, .. }
            | ColumnTransform::ImputeRange { column, .. }
            | ColumnTransform::ImputeValues { column, .. }
            | ColumnTransform::ImputeYear { column, .. }
            | ColumnTransform::ReplaceYear { column, .. } => column,
        }
    }

    /// Get a human-readable description of the operation.
    pub fn description(&self) -> String {
        match self {
            ColumnTransform::Replace { column, mapping, .. } => {
                let examples: Vec<String> = mapping
                    .iter()
                    .take(3)
                    .map(|(from, to)| format!("'{}' → '{}'", from, to))
                    .collect();
                format!("Replace in '{}': {}", column, examples.join(", "))
            }
            ColumnTransform::ImputeRange { column, range } => {
                format!(
                    "Set values outside [{}, {}] to NA in '{}'",
                    range.lower(),
                    range.upper(),
                    column
                )
            }
            ColumnTransform::ImputeValues { column, nan_values } => {
                let values: Vec<String> = nan_values.iter().map(|v| v.to_string()).collect();
                format!("Convert [{}] to NA in '{}'", values.join(", "), column)
            }
            ColumnTransform::ImputeYear {
                column,
                year_column,
            } => format!("Move dates in '{}' to the year in '{}'", column, year_column),
            ColumnTransform::ReplaceYear {
                column,
                new_year,
                old_year,
            } => format!("Move {} dates in '{}' to {}", old_year, column, new_year),
        }
    }
}

/// Result of applying a list of transformations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransformResult {
    /// Number of operations applied.
    pub operations_applied: usize,

    /// Number of log entries written across all operations.
    pub entries_logged: usize,

    /// Detailed changes for each operation.
    pub changes: Vec<TransformChange>,
}

/// Summary of a single applied transformation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformChange {
    /// Description of the change.
    pub description: String,

    /// Column affected.
    pub column: String,

    /// Number of log entries this operation wrote.
    pub entries_logged: usize,

    /// Number of missing values after the operation.
    pub missing_after: usize,
}

impl TransformResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a change to the result.
    pub fn add_change(&mut self, change: TransformChange) {
        self.operations_applied += 1;
        self.entries_logged += change.entries_logged;
        self.changes.push(change);
    }
}
