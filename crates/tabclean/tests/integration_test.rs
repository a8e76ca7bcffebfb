//! Integration tests for tabclean.

use chrono::NaiveDate;
use tabclean::{
    ChangeLog, Cleaner, CleanerConfig, ColumnTransform, MatchMode, Range, ReplacementMap, Table,
    TabcleanError, Value, concat_codes, impute_out_of_range, impute_range_logged, impute_value,
    impute_year, impute_years_logged, replace_logged, replace_year,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// A small survey extract with the problems the transforms are meant to fix.
fn survey() -> Table {
    Table::from_strings(
        &["folio", "sexo", "edad", "fecha", "anio"],
        &[
            vec!["101", "Masc.", "34", "1900-10-11", "2017"],
            vec!["102", "Fem.", "150", "2000-02-29", "2017"],
            vec!["103", "NA", "NA", "NA", "2017"],
            vec!["104", "Masculino", "27", "2017-05-02", "2017"],
        ],
        &["NA".to_string()],
    )
    .expect("Failed to build table")
}

// =============================================================================
// Scalar Helpers
// =============================================================================

#[test]
fn test_scalar_helpers() {
    assert!(impute_value(&Value::Int(5), &[Value::Int(5), Value::Int(6)]).is_missing());
    assert_eq!(
        impute_value(&Value::Int(7), &[Value::Int(5), Value::Int(6)]),
        Value::Int(7)
    );

    let range = Range::new(1.0, 10.0).unwrap();
    assert_eq!(impute_out_of_range(&Value::Int(1), &range).unwrap(), Value::Int(1));
    assert!(impute_out_of_range(&Value::Int(11), &range).unwrap().is_missing());

    assert_eq!(impute_year(ymd(2000, 3, 15), 2021).unwrap(), ymd(2021, 3, 15));
    assert_eq!(impute_year(ymd(2000, 2, 29), 2017).unwrap(), ymd(2017, 2, 28));
    assert_eq!(replace_year(ymd(1900, 1, 1), 2017, 1900).unwrap(), ymd(2017, 1, 1));
    assert_eq!(replace_year(ymd(1901, 1, 1), 2017, 1900).unwrap(), ymd(1901, 1, 1));

    assert_eq!(concat_codes([0, -1, 2, 1]), "0-21");
}

// =============================================================================
// Logged Transforms
// =============================================================================

#[test]
fn test_replace_logged_substring() {
    let table = survey();
    let map = ReplacementMap::from_pairs(
        MatchMode::Regex,
        [(r"^Masc\.$", "Masculino"), (r"^Fem\.$", "Femenino")],
    )
    .unwrap();
    let mut log = ChangeLog::new();

    let column = replace_logged(&table, "sexo", "folio", &map, &mut log).unwrap();

    assert_eq!(column.len(), table.row_count());
    assert_eq!(column.values[0], Value::from("Masculino"));
    assert_eq!(column.values[1], Value::from("Femenino"));
    assert!(column.values[2].is_missing());
    assert_eq!(column.values[3], Value::from("Masculino"));
    assert_eq!(
        log.lines(),
        vec![
            "'folio' = 101, 'sexo': Masc. >> Masculino".to_string(),
            "'folio' = 102, 'sexo': Fem. >> Femenino".to_string(),
        ]
    );
}

#[test]
fn test_range_then_years_share_one_log() {
    let table = survey();
    let mut log = ChangeLog::new();

    let edad = impute_range_logged(&table, "edad", "folio", &Range::new(0.0, 120.0).unwrap(), &mut log)
        .unwrap();
    let fecha = impute_years_logged(&table, "fecha", "folio", "anio", &mut log).unwrap();

    assert!(edad.values[1].is_missing());
    assert_eq!(fecha.values[0], Value::Date(ymd(2017, 10, 11)));
    assert_eq!(fecha.values[1], Value::Date(ymd(2017, 2, 28)));
    assert!(fecha.values[2].is_missing());
    assert_eq!(
        log.lines(),
        vec![
            "'folio' = 102, 'edad': 150 >> nan".to_string(),
            "'folio' = 101, 'fecha': 1900-10-11 >> 2017-10-11".to_string(),
            "'folio' = 102, 'fecha': 2000-02-29 >> 2017-02-28".to_string(),
        ]
    );
}

#[test]
fn test_failed_transform_appends_nothing() {
    let table = survey();
    let mut log = ChangeLog::new();
    log.push(tabclean::ChangeRecord {
        id_column: "folio".into(),
        id: Value::Int(1),
        column: "x".into(),
        old: Value::Int(1),
        new: Value::Int(2),
    });

    let err = impute_range_logged(&table, "sexo", "folio", &Range::new(0.0, 1.0).unwrap(), &mut log)
        .unwrap_err();

    assert!(matches!(err, TabcleanError::TypeMismatch { row: 0, .. }));
    assert_eq!(log.len(), 1);
}

// =============================================================================
// Cleaner Pipeline
// =============================================================================

#[test]
fn test_cleaner_pipeline_from_json_steps() {
    let config = CleanerConfig::from_json(r#"{"id_column": "folio", "null_tokens": ["NA"]}"#).unwrap();
    let mut cleaner = Cleaner::with_config(config);
    let mut table = survey();

    let steps: Vec<ColumnTransform> = serde_json::from_str(
        r#"[
            {"op": "replace", "column": "sexo", "mapping": {"^Masc\\.$": "Masculino"}},
            {"op": "impute_range", "column": "edad", "range": [0, 120]},
            {"op": "impute_year", "column": "fecha", "year_column": "anio"}
        ]"#,
    )
    .unwrap();

    let result = cleaner.apply_all(&mut table, &steps).unwrap();

    assert_eq!(result.operations_applied, 3);
    assert_eq!(result.entries_logged, 4);
    assert_eq!(table.row_count(), 4);
    assert_eq!(table.get(0, 1), Some(&Value::from("Masculino")));
    assert!(table.get(1, 2).unwrap().is_missing());
    assert_eq!(table.get(1, 3), Some(&Value::Date(ymd(2017, 2, 28))));

    let json: serde_json::Value = serde_json::from_str(&cleaner.log().to_json().unwrap()).unwrap();
    assert_eq!(json.as_array().map(|a| a.len()), Some(4));
    assert_eq!(json[0]["column"], "sexo");
    assert_eq!(json[1]["new"], serde_json::Value::Null);
}

#[test]
fn test_cleaner_missing_column() {
    let mut cleaner = Cleaner::new();
    let mut table = survey();
    let err = cleaner
        .impute_values(&mut table, "peso", vec![Value::Int(999)])
        .unwrap_err();
    assert!(matches!(err, TabcleanError::ColumnNotFound(name) if name == "peso"));
}

#[test]
fn test_cleaner_replace_years() {
    let mut cleaner = Cleaner::with_config(CleanerConfig {
        id_column: "folio".to_string(),
        ..CleanerConfig::default()
    });
    let mut table = survey();

    let logged = cleaner.replace_years(&mut table, "fecha", 2017, 1900).unwrap();

    assert_eq!(logged, 1);
    assert_eq!(table.get(0, 3), Some(&Value::Date(ymd(2017, 10, 11))));
    assert_eq!(table.get(1, 3), Some(&Value::Date(ymd(2000, 2, 29))));
}
