//! Category code concatenation.
//!
//! Category codes are small integers with missing values encoded as `-1`.
//! Concatenating the first character of each code gives a compact pattern
//! string per row, e.g. `[0, -1, 2, 1]` becomes `"0-21"`.

use crate::error::{Result, TabcleanError};
use crate::table::{Column, Table};
use crate::value::{MISSING, Value};

/// Concatenate the first character of each code's decimal form.
pub fn concat_codes<I>(codes: I) -> String
where
    I: IntoIterator<Item = i64>,
{
    codes
        .into_iter()
        .filter_map(|code| code.to_string().chars().next())
        .collect()
}

/// Concatenate codes held as cell values.
///
/// Every value must be integer-convertible; `column` is only used to
/// describe a failure.
pub fn concat_code_values(values: &[Value], column: &str, row: usize) -> Result<String> {
    let codes = values
        .iter()
        .map(|value| code_of(value, column, row))
        .collect::<Result<Vec<i64>>>()?;
    Ok(concat_codes(codes))
}

fn code_of(value: &Value, column: &str, row: usize) -> Result<i64> {
    value.as_integer().ok_or_else(|| TabcleanError::TypeMismatch {
        column: column.to_string(),
        row,
        message: format!("expected an integer code, found {} '{}'", value.kind(), value),
    })
}

/// Build a text column with one concatenated code string per row.
pub fn concat_code_columns(table: &Table, columns: &[&str], output: &str) -> Result<Column> {
    let indices = columns
        .iter()
        .map(|name| table.require_column(name))
        .collect::<Result<Vec<usize>>>()?;

    let mut values = Vec::with_capacity(table.row_count());
    for (row_idx, row) in table.rows.iter().enumerate() {
        let mut codes = Vec::with_capacity(indices.len());
        for (&col_idx, name) in indices.iter().zip(columns) {
            let value = row.get(col_idx).unwrap_or(&MISSING);
            codes.push(code_of(value, name, row_idx)?);
        }
        values.push(Value::Text(concat_codes(codes)));
    }

    tracing::debug!(output, sources = columns.len(), rows = values.len(), "Concatenated code columns");
    Ok(Column::new(output, values))
}
