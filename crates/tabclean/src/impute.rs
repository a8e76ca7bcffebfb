//! Scalar imputation helpers: set values to missing when they are invalid.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TabcleanError};
use crate::value::Value;

/// Inclusive `[lower, upper]` bounds for valid numeric values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(f64, f64)", into = "(f64, f64)")]
pub struct Range {
    lower: f64,
    upper: f64,
}

impl Range {
    /// Create a range. Fails if a bound is NaN or `lower > upper`.
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        if lower.is_nan() || upper.is_nan() {
            return Err(TabcleanError::InvalidRange(format!(
                "bounds must be numbers, got [{}, {}]",
                lower, upper
            )));
        }
        if lower > upper {
            return Err(TabcleanError::InvalidRange(format!(
                "lower bound {} is greater than upper bound {}",
                lower, upper
            )));
        }
        Ok(Self { lower, upper })
    }

    /// Lower bound.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper bound.
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Returns true if `x` lies within the bounds.
    pub fn contains(&self, x: f64) -> bool {
        self.lower <= x && x <= self.upper
    }
}

impl TryFrom<(f64, f64)> for Range {
    type Error = TabcleanError;

    fn try_from((lower, upper): (f64, f64)) -> Result<Self> {
        Self::new(lower, upper)
    }
}

impl From<Range> for (f64, f64) {
    fn from(range: Range) -> Self {
        (range.lower, range.upper)
    }
}

/// Return the missing marker if `value` is one of `nan_values`.
pub fn impute_value(value: &Value, nan_values: &[Value]) -> Value {
    if nan_values.iter().any(|v| v == value) {
        Value::Missing
    } else {
        value.clone()
    }
}

/// Return the missing marker if `value` lies outside `range`.
///
/// Missing values stay missing. Non-numeric values are a type error.
pub fn impute_out_of_range(value: &Value, range: &Range) -> Result<Value> {
    if value.is_missing() {
        return Ok(Value::Missing);
    }
    let x = value.as_f64().ok_or_else(|| {
        TabcleanError::NotNumeric(format!(
            "cannot compare {} value '{}' with a numeric range",
            value.kind(),
            value
        ))
    })?;
    if range.contains(x) {
        Ok(value.clone())
    } else {
        Ok(Value::Missing)
    }
}
