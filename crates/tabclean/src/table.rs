//! In-memory tables and columns.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TabcleanError};
use crate::value::{MISSING, Value};

/// A named, ordered sequence of values, one per table row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Values in row order.
    pub values: Vec<Value>,
}

impl Column {
    /// Create a column from a name and values.
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the column holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get a value by row index.
    pub fn get(&self, row: usize) -> Option<&Value> {
        self.values.get(row)
    }

    /// Iterate values in row order.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }

    /// Number of missing values.
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }
}

/// Represents tabular data with typed cells.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data (row-major order).
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create a table, checking that every row has one cell per header.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        let expected = headers.len();
        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(TabcleanError::RowWidth {
                row,
                expected,
                found: cells.len(),
            });
        }
        Ok(Self { headers, rows })
    }

    /// Create a table from raw string cells, parsing each into a [`Value`].
    pub fn from_strings<S: AsRef<str>>(
        headers: &[S],
        rows: &[Vec<S>],
        null_tokens: &[String],
    ) -> Result<Self> {
        let headers = headers.iter().map(|h| h.as_ref().to_string()).collect();
        let rows = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| Value::parse(cell.as_ref(), null_tokens))
                    .collect()
            })
            .collect();
        Self::new(headers, rows)
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Find a column index by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Find a column index by name, failing if it does not exist.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| TabcleanError::ColumnNotFound(name.to_string()))
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &Value> {
        self.rows
            .iter()
            .map(move |row| row.get(index).unwrap_or(&MISSING))
    }

    /// Copy a column out of the table by name.
    pub fn column(&self, name: &str) -> Result<Column> {
        let index = self.require_column(name)?;
        Ok(Column::new(name, self.column_values(index).cloned().collect()))
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Set a specific cell value. Out-of-bounds positions are ignored.
    pub fn set(&mut self, row: usize, col: usize, value: Value) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = value;
        }
    }

    /// Write a column back into the table.
    ///
    /// Replaces the column named `column.name` if present, otherwise appends
    /// it as a new column.
    pub fn set_column(&mut self, column: Column) -> Result<()> {
        let found = column.len();
        if found != self.row_count() {
            return Err(TabcleanError::LengthMismatch {
                column: column.name,
                expected: self.row_count(),
                found,
            });
        }

        match self.column_index(&column.name) {
            Some(index) => {
                for (row, value) in self.rows.iter_mut().zip(column.values) {
                    row[index] = value;
                }
            }
            None => {
                self.headers.push(column.name);
                for (row, value) in self.rows.iter_mut().zip(column.values) {
                    row.push(value);
                }
            }
        }
        Ok(())
    }
}
