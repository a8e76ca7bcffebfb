//! Column transforms that record every changed cell.
//!
//! Each function reads one column, computes the new column, compares old and
//! new row by row and appends a [`ChangeRecord`](crate::audit::ChangeRecord)
//! for each changed row to the caller's [`ChangeLog`]. The returned column
//! always has the same length and order as the input.
//!
//! A failing row aborts the whole column: the error is returned and nothing
//! is appended to the log.

use crate::audit::{ChangeLog, MissingPolicy, diff_column};
use crate::dates;
use crate::error::{Result, TabcleanError};
use crate::impute::{self, Range};
use crate::replace::ReplacementMap;
use crate::table::{Column, Table};
use crate::value::Value;

/// Apply a replacement map to `column`.
///
/// Rows where the old or the new value is missing are not logged.
pub fn replace_logged(
    table: &Table,
    column: &str,
    id_column: &str,
    map: &ReplacementMap,
    log: &mut ChangeLog,
) -> Result<Column> {
    let old = table.column(column)?;
    let new = old.values.iter().map(|v| map.apply(v)).collect();
    finish(table, old, new, id_column, MissingPolicy::SkipEither, log)
}

/// Set values of `column` outside `range` to missing.
///
/// Rows where the old value is missing are not logged; a value turned
/// missing is logged as `... >> nan`.
pub fn impute_range_logged(
    table: &Table,
    column: &str,
    id_column: &str,
    range: &Range,
    log: &mut ChangeLog,
) -> Result<Column> {
    let old = table.column(column)?;
    let new = old
        .values
        .iter()
        .enumerate()
        .map(|(row, v)| impute::impute_out_of_range(v, range).map_err(|e| e.at(column, row)))
        .collect::<Result<Vec<_>>>()?;
    finish(table, old, new, id_column, MissingPolicy::SkipOld, log)
}

/// Set values of `column` found in `nan_values` to missing.
///
/// Logged like [`impute_range_logged`].
pub fn impute_values_logged(
    table: &Table,
    column: &str,
    id_column: &str,
    nan_values: &[Value],
    log: &mut ChangeLog,
) -> Result<Column> {
    let old = table.column(column)?;
    let new = old
        .values
        .iter()
        .map(|v| impute::impute_value(v, nan_values))
        .collect();
    finish(table, old, new, id_column, MissingPolicy::SkipOld, log)
}

/// Move every date of `column` into the year held by `year_column`.
///
/// Missing dates stay missing. A present date whose year cell is missing or
/// not an integer is an error. Rows where the old or the new value is missing
/// are not logged.
pub fn impute_years_logged(
    table: &Table,
    column: &str,
    id_column: &str,
    year_column: &str,
    log: &mut ChangeLog,
) -> Result<Column> {
    let old = table.column(column)?;
    let years = table.column(year_column)?;

    let new = old
        .values
        .iter()
        .zip(&years.values)
        .enumerate()
        .map(|(row, (value, year))| -> Result<Value> {
            let Some(date) = date_cell(value, column, row)? else {
                return Ok(Value::Missing);
            };
            let year = year_cell(year, year_column, row)?;
            Ok(Value::Date(dates::impute_year(date, year)?))
        })
        .collect::<Result<Vec<_>>>()?;
    finish(table, old, new, id_column, MissingPolicy::SkipEither, log)
}

/// Move dates of `column` that fall in `old_year` into `new_year`.
///
/// Logged like [`impute_years_logged`].
pub fn replace_years_logged(
    table: &Table,
    column: &str,
    id_column: &str,
    new_year: i32,
    old_year: i32,
    log: &mut ChangeLog,
) -> Result<Column> {
    let old = table.column(column)?;
    let new = old
        .values
        .iter()
        .enumerate()
        .map(|(row, value)| -> Result<Value> {
            match date_cell(value, column, row)? {
                Some(date) => Ok(Value::Date(dates::replace_year(date, new_year, old_year)?)),
                None => Ok(Value::Missing),
            }
        })
        .collect::<Result<Vec<_>>>()?;
    finish(table, old, new, id_column, MissingPolicy::SkipEither, log)
}

fn date_cell(value: &Value, column: &str, row: usize) -> Result<Option<chrono::NaiveDate>> {
    match value {
        v if v.is_missing() => Ok(None),
        Value::Date(d) => Ok(Some(*d)),
        other => Err(TabcleanError::TypeMismatch {
            column: column.to_string(),
            row,
            message: format!("expected a date, found {} '{}'", other.kind(), other),
        }),
    }
}

fn year_cell(value: &Value, column: &str, row: usize) -> Result<i32> {
    value
        .as_integer()
        .and_then(|y| i32::try_from(y).ok())
        .ok_or_else(|| TabcleanError::TypeMismatch {
            column: column.to_string(),
            row,
            message: format!("expected an integer year, found {} '{}'", value.kind(), value),
        })
}

/// Diff old against new, append the changes and return the new column.
fn finish(
    table: &Table,
    old: Column,
    new: Vec<Value>,
    id_column: &str,
    policy: MissingPolicy,
    log: &mut ChangeLog,
) -> Result<Column> {
    let ids = table.column(id_column)?;
    let changes = diff_column(&ids.values, &old.values, &new, id_column, &old.name, policy);

    tracing::debug!(
        column = %old.name,
        rows = new.len(),
        logged = changes.len(),
        "Column transform applied"
    );

    for change in changes {
        log.push(change);
    }
    Ok(Column::new(old.name, new))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::replace::MatchMode;

    fn ymd(y: i32, m: u32, d: u32) -> Value {
        Value::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn table(headers: &[&str], rows: Vec<Vec<Value>>) -> Table {
        Table::new(headers.iter().map(|h| h.to_string()).collect(), rows).unwrap()
    }

    #[test]
    fn test_replace_logged() {
        let t = table(
            &["id", "animal"],
            vec![
                vec![Value::Int(1), Value::from("CAT")],
                vec![Value::Int(2), Value::from("DOG")],
                vec![Value::Int(3), Value::Missing],
            ],
        );
        let map = ReplacementMap::from_pairs(MatchMode::Regex, [("A", "B")]).unwrap();
        let mut log = ChangeLog::new();

        let col = replace_logged(&t, "animal", "id", &map, &mut log).unwrap();

        assert_eq!(col.len(), 3);
        assert_eq!(col.values[0], Value::from("CBT"));
        assert_eq!(col.values[1], Value::from("DOG"));
        assert!(col.values[2].is_missing());
        assert_eq!(log.lines(), vec!["'id' = 1, 'animal': CAT >> CBT".to_string()]);
    }

    #[test]
    fn test_replace_to_missing_not_logged() {
        let t = table(&["id", "v"], vec![vec![Value::Int(1), Value::from("s/d")]]);
        let map = ReplacementMap::from_pairs(MatchMode::Exact, [("s/d", Value::Missing)]).unwrap();
        let mut log = ChangeLog::new();

        let col = replace_logged(&t, "v", "id", &map, &mut log).unwrap();
        assert!(col.values[0].is_missing());
        assert!(log.is_empty());
    }

    #[test]
    fn test_impute_range_logged() {
        let t = table(
            &["folio", "edad"],
            vec![
                vec![Value::from("A1"), Value::Int(35)],
                vec![Value::from("A2"), Value::Int(150)],
                vec![Value::from("A3"), Value::Missing],
                vec![Value::from("A4"), Value::Float(-2.5)],
            ],
        );
        let range = Range::new(0.0, 120.0).unwrap();
        let mut log = ChangeLog::new();

        let col = impute_range_logged(&t, "edad", "folio", &range, &mut log).unwrap();

        assert_eq!(col.values[0], Value::Int(35));
        assert!(col.values[1].is_missing());
        assert!(col.values[2].is_missing());
        assert!(col.values[3].is_missing());
        assert_eq!(
            log.lines(),
            vec![
                "'folio' = A2, 'edad': 150 >> nan".to_string(),
                "'folio' = A4, 'edad': -2.5 >> nan".to_string(),
            ]
        );
    }

    #[test]
    fn test_impute_range_bad_row_aborts() {
        let t = table(
            &["id", "v"],
            vec![
                vec![Value::Int(1), Value::Int(500)],
                vec![Value::Int(2), Value::from("n/a")],
            ],
        );
        let range = Range::new(0.0, 10.0).unwrap();
        let mut log = ChangeLog::new();

        let err = impute_range_logged(&t, "v", "id", &range, &mut log).unwrap_err();
        assert!(matches!(err, TabcleanError::TypeMismatch { row: 1, ref column, .. } if column == "v"));
        assert!(log.is_empty());
    }

    #[test]
    fn test_impute_values_logged() {
        let t = table(
            &["id", "score"],
            vec![
                vec![Value::Int(1), Value::Int(5)],
                vec![Value::Int(2), Value::Int(7)],
                vec![Value::Int(3), Value::Int(6)],
            ],
        );
        let mut log = ChangeLog::new();
        let col =
            impute_values_logged(&t, "score", "id", &[Value::Int(5), Value::Int(6)], &mut log).unwrap();

        assert!(col.values[0].is_missing());
        assert_eq!(col.values[1], Value::Int(7));
        assert_eq!(log.len(), 2);
        assert_eq!(log.lines()[1], "'id' = 3, 'score': 6 >> nan");
    }

    #[test]
    fn test_impute_years_logged() {
        let t = table(
            &["id", "fecha", "anio"],
            vec![
                vec![Value::Int(1), ymd(1900, 10, 11), Value::Int(2017)],
                vec![Value::Int(2), ymd(2000, 2, 29), Value::Float(2017.0)],
                vec![Value::Int(3), ymd(2018, 1, 5), Value::Int(2018)],
                vec![Value::Int(4), Value::Missing, Value::Int(2018)],
            ],
        );
        let mut log = ChangeLog::new();

        let col = impute_years_logged(&t, "fecha", "id", "anio", &mut log).unwrap();

        assert_eq!(col.values[0], ymd(2017, 10, 11));
        assert_eq!(col.values[1], ymd(2017, 2, 28));
        assert_eq!(col.values[2], ymd(2018, 1, 5));
        assert!(col.values[3].is_missing());
        assert_eq!(
            log.lines(),
            vec![
                "'id' = 1, 'fecha': 1900-10-11 >> 2017-10-11".to_string(),
                "'id' = 2, 'fecha': 2000-02-29 >> 2017-02-28".to_string(),
            ]
        );
    }

    #[test]
    fn test_impute_years_missing_year_is_error() {
        let t = table(
            &["id", "fecha", "anio"],
            vec![vec![Value::Int(1), ymd(1900, 10, 11), Value::Missing]],
        );
        let mut log = ChangeLog::new();
        let err = impute_years_logged(&t, "fecha", "id", "anio", &mut log).unwrap_err();
        assert!(matches!(err, TabcleanError::TypeMismatch { ref column, .. } if column == "anio"));
    }

    #[test]
    fn test_replace_years_logged() {
        let t = table(
            &["id", "fecha"],
            vec![
                vec![Value::Int(1), ymd(1900, 6, 1)],
                vec![Value::Int(2), ymd(2016, 6, 1)],
            ],
        );
        let mut log = ChangeLog::new();
        let col = replace_years_logged(&t, "fecha", "id", 2016, 1900, &mut log).unwrap();

        assert_eq!(col.values[0], ymd(2016, 6, 1));
        assert_eq!(col.values[1], ymd(2016, 6, 1));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_unknown_columns() {
        let t = table(&["id", "v"], vec![vec![Value::Int(1), Value::Int(2)]]);
        let map = ReplacementMap::default();
        let mut log = ChangeLog::new();
        assert!(matches!(
            replace_logged(&t, "w", "id", &map, &mut log),
            Err(TabcleanError::ColumnNotFound(_))
        ));
        assert!(matches!(
            replace_logged(&t, "v", "key", &map, &mut log),
            Err(TabcleanError::ColumnNotFound(_))
        ));
    }
}
