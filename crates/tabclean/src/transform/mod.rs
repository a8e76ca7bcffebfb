//! Logged column transforms and the engine that applies them.

mod engine;
mod logged;
mod operations;

pub use engine::TransformEngine;
pub use logged::{
    impute_range_logged, impute_values_logged, impute_years_logged, replace_logged,
    replace_years_logged,
};
pub use operations::{ColumnTransform, TransformChange, TransformResult};
