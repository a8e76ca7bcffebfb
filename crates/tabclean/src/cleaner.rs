//! Main Cleaner struct and public API.

use crate::audit::ChangeLog;
use crate::codes;
use crate::config::CleanerConfig;
use crate::error::Result;
use crate::impute::Range;
use crate::replace::ReplacementMap;
use crate::table::Table;
use crate::transform::{ColumnTransform, TransformChange, TransformEngine, TransformResult};
use crate::value::Value;

/// Applies cleaning steps to tables and keeps the change log they produce.
#[derive(Debug, Clone)]
pub struct Cleaner {
    config: CleanerConfig,
    engine: TransformEngine,
    log: ChangeLog,
}

impl Cleaner {
    /// Create a cleaner with default configuration.
    pub fn new() -> Self {
        Self::with_config(CleanerConfig::default())
    }

    /// Create a cleaner with custom configuration.
    pub fn with_config(config: CleanerConfig) -> Self {
        let engine =
            TransformEngine::new(config.id_column.clone()).with_match_mode(config.match_mode);
        Self {
            config,
            engine,
            log: ChangeLog::new(),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &CleanerConfig {
        &self.config
    }

    /// Build a table from raw string cells using the configured null tokens.
    pub fn table_from_strings<S: AsRef<str>>(&self, headers: &[S], rows: &[Vec<S>]) -> Result<Table> {
        Table::from_strings(headers, rows, &self.config.null_tokens)
    }

    /// Build a replacement map in the configured match mode.
    pub fn replacement_map<P, V, I>(&self, pairs: I) -> Result<ReplacementMap>
    where
        P: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (P, V)>,
    {
        ReplacementMap::from_pairs(self.config.match_mode, pairs)
    }

    /// Apply a replacement map to `column` in place.
    pub fn replace(&mut self, table: &mut Table, column: &str, map: &ReplacementMap) -> Result<usize> {
        let before = self.log.len();
        let new =
            crate::transform::replace_logged(table, column, &self.config.id_column, map, &mut self.log)?;
        table.set_column(new)?;
        Ok(self.log.len() - before)
    }

    /// Set values of `column` outside `range` to missing, in place.
    pub fn impute_range(&mut self, table: &mut Table, column: &str, range: Range) -> Result<usize> {
        self.apply_counted(
            table,
            &ColumnTransform::ImputeRange {
                column: column.to_string(),
                range,
            },
        )
    }

    /// Set values of `column` found in `nan_values` to missing, in place.
    pub fn impute_values(
        &mut self,
        table: &mut Table,
        column: &str,
        nan_values: Vec<Value>,
    ) -> Result<usize> {
        self.apply_counted(
            table,
            &ColumnTransform::ImputeValues {
                column: column.to_string(),
                nan_values,
            },
        )
    }

    /// Move dates of `column` into the year held by `year_column`, in place.
    pub fn impute_years(&mut self, table: &mut Table, column: &str, year_column: &str) -> Result<usize> {
        self.apply_counted(
            table,
            &ColumnTransform::ImputeYear {
                column: column.to_string(),
                year_column: year_column.to_string(),
            },
        )
    }

    /// Move dates of `column` from `old_year` into `new_year`, in place.
    pub fn replace_years(
        &mut self,
        table: &mut Table,
        column: &str,
        new_year: i32,
        old_year: i32,
    ) -> Result<usize> {
        self.apply_counted(
            table,
            &ColumnTransform::ReplaceYear {
                column: column.to_string(),
                new_year,
                old_year,
            },
        )
    }

    /// Add (or overwrite) `output` with the concatenated codes of `columns`.
    pub fn concat_codes(&self, table: &mut Table, columns: &[&str], output: &str) -> Result<()> {
        let column = codes::concat_code_columns(table, columns, output)?;
        table.set_column(column)
    }

    /// Apply a single transformation step.
    pub fn apply(&mut self, table: &mut Table, operation: &ColumnTransform) -> Result<TransformChange> {
        self.engine.apply(operation, table, &mut self.log)
    }

    /// Apply a list of transformation steps in order.
    pub fn apply_all(
        &mut self,
        table: &mut Table,
        operations: &[ColumnTransform],
    ) -> Result<TransformResult> {
        self.engine.apply_all(operations, table, &mut self.log)
    }

    /// The change log collected so far.
    pub fn log(&self) -> &ChangeLog {
        &self.log
    }

    /// Take the collected log, leaving an empty one behind.
    pub fn take_log(&mut self) -> ChangeLog {
        std::mem::take(&mut self.log)
    }

    fn apply_counted(&mut self, table: &mut Table, operation: &ColumnTransform) -> Result<usize> {
        Ok(self.apply(table, operation)?.entries_logged)
    }
}

impl Default for Cleaner {
    fn default() -> Self {
        Self::new()
    }
}
