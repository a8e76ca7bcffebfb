//! Year substitution for calendar dates.

use chrono::{Datelike, NaiveDate};

use crate::error::{Result, TabcleanError};

/// Move `date` into `new_year`, keeping month and day.
///
/// February 29 moved into a non-leap year becomes February 28. Any other
/// date that cannot be built (a year outside the supported calendar) is an
/// error.
pub fn impute_year(date: NaiveDate, new_year: i32) -> Result<NaiveDate> {
    let (month, day) = (date.month(), date.day());
    if let Some(moved) = NaiveDate::from_ymd_opt(new_year, month, day) {
        return Ok(moved);
    }

    if month == 2 && day == 29 {
        if let Some(moved) = NaiveDate::from_ymd_opt(new_year, month, day - 1) {
            tracing::warn!(
                from = %date,
                to = %moved,
                "Leap day moved into non-leap year, using previous day"
            );
            return Ok(moved);
        }
    }

    Err(TabcleanError::InvalidDate {
        year: new_year,
        month,
        day,
    })
}

/// Move `date` into `new_year` only if it currently falls in `old_year`.
pub fn replace_year(date: NaiveDate, new_year: i32, old_year: i32) -> Result<NaiveDate> {
    if date.year() == old_year {
        impute_year(date, new_year)
    } else {
        Ok(date)
    }
}
