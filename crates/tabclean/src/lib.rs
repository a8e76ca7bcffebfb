//! tabclean: column cleaning transforms for tabular data.
//!
//! Every transform reads one column of a [`Table`], computes a new column of
//! the same length and order, and appends one entry to a caller-owned
//! [`ChangeLog`] for each row whose value changed:
//!
//! ```text
//! 'folio' = 17, 'edad': 150 >> nan
//! ```
//!
//! # Core Principles
//!
//! - **Explicit side effects**: the log is passed as `&mut ChangeLog`
//! - **All or nothing**: a bad row fails the whole column and logs nothing
//! - **Missing is a value**: [`Value::Missing`] is distinct from "unchanged"
//!
//! # Example
//!
//! ```
//! use tabclean::{ChangeLog, MatchMode, ReplacementMap, Table, replace_logged};
//!
//! let table = Table::from_strings(
//!     &["id", "animal"],
//!     &[vec!["1", "CAT"], vec!["2", "DOG"]],
//!     &[],
//! )
//! .unwrap();
//!
//! let map = ReplacementMap::from_pairs(MatchMode::Regex, [("A", "B")]).unwrap();
//! let mut log = ChangeLog::new();
//! let column = replace_logged(&table, "animal", "id", &map, &mut log).unwrap();
//!
//! assert_eq!(column.len(), 2);
//! assert_eq!(log.lines(), vec!["'id' = 1, 'animal': CAT >> CBT".to_string()]);
//! ```

pub mod audit;
pub mod codes;
pub mod config;
pub mod dates;
pub mod error;
pub mod impute;
pub mod replace;
pub mod table;
pub mod transform;
pub mod value;

mod cleaner;

pub use crate::cleaner::Cleaner;
pub use audit::{ChangeLog, ChangeRecord, MissingPolicy};
pub use codes::{concat_code_columns, concat_code_values, concat_codes};
pub use config::CleanerConfig;
pub use dates::{impute_year, replace_year};
pub use error::{Result, TabcleanError};
pub use impute::{Range, impute_out_of_range, impute_value};
pub use replace::{MatchMode, ReplacementMap};
pub use table::{Column, Table};
pub use transform::{
    ColumnTransform, TransformChange, TransformEngine, TransformResult, impute_range_logged,
    impute_values_logged, impute_years_logged, replace_logged, replace_years_logged,
};
pub use value::Value;
