//! Transformation engine that applies column transforms to a table.

use crate::audit::ChangeLog;
use crate::error::Result;
use crate::replace::{MatchMode, ReplacementMap};
use crate::table::{Column, Table};

use super::logged;
use super::operations::{ColumnTransform, TransformChange, TransformResult};

/// Engine for applying transformations to a table in place.
#[derive(Debug, Clone)]
pub struct TransformEngine {
    id_column: String,
    match_mode: MatchMode,
}

impl TransformEngine {
    /// Create an engine that identifies rows by `id_column`.
    pub fn new(id_column: impl Into<String>) -> Self {
        Self {
            id_column: id_column.into(),
            match_mode: MatchMode::default(),
        }
    }

    /// Set the default match mode for replace operations.
    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    /// Column used to identify rows in the log.
    pub fn id_column(&self) -> &str {
        &self.id_column
    }

    /// Default match mode for replace operations.
    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    /// Compute the new column for an operation without touching the table.
    pub fn transform(
        &self,
        operation: &ColumnTransform,
        table: &Table,
        log: &mut ChangeLog,
    ) -> Result<Column> {
        let id = self.id_column.as_str();
        match operation {
            ColumnTransform::Replace {
                column,
                mapping,
                mode,
            } => {
                let map = ReplacementMap::from_pairs(
                    mode.unwrap_or(self.match_mode),
                    mapping.iter().map(|(from, to)| (from.clone(), to.clone())),
                )?;
                logged::replace_logged(table, column, id, &map, log)
            }
            ColumnTransform::ImputeRange { column, range } => {
                logged::impute_range_logged(table, column, id, range, log)
            }
            ColumnTransform::ImputeValues { column, nan_values } => {
                logged::impute_values_logged(table, column, id, nan_values, log)
            }
            ColumnTransform::ImputeYear {
                column,
                year_column,
            } => logged::impute_years_logged(table, column, id, year_column, log),
            ColumnTransform::ReplaceYear {
                column,
                new_year,
                old_year,
            } => logged::replace_years_logged(table, column, id, *new_year, *old_year, log),
        }
    }

    /// Apply one operation and write the new column back into the table.
    pub fn apply(
        &self,
        operation: &ColumnTransform,
        table: &mut Table,
        log: &mut ChangeLog,
    ) -> Result<TransformChange> {
        let before = log.len();
        let column = self.transform(operation, table, log)?;
        let change = TransformChange {
            description: operation.description(),
            column: column.name.clone(),
            entries_logged: log.len() - before,
            missing_after: column.missing_count(),
        };
        table.set_column(column)?;
        Ok(change)
    }

    /// Apply operations in order.
    ///
    /// Stops at the first failing operation; operations before it stay
    /// applied and logged.
    pub fn apply_all(
        &self,
        operations: &[ColumnTransform],
        table: &mut Table,
        log: &mut ChangeLog,
    ) -> Result<TransformResult> {
        let mut result = TransformResult::new();
        for operation in operations {
            let change = self.apply(operation, table, log)?;
            tracing::debug!(
                column = %change.column,
                logged = change.entries_logged,
                "{}",
                change.description
            );
            result.add_change(change);
        }
        Ok(result)
    }
}

impl Default for TransformEngine {
    fn default() -> Self {
        Self::new("id")
    }
}
