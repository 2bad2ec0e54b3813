pub mod grid;

use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate};

use crate::calendar::{parse_date, DisplayCursor};

/// Parse an optional date argument
///
/// Accepts the forms the picker accepts (`YYYY-MM-DD`, `YYYY/MM/DD`, ...).
/// Returns an error if the date string is malformed.
pub fn parse_date_arg(date: Option<&str>) -> Result<Option<NaiveDate>> {
    date.map(|date_str| {
        parse_date(date_str)
            .with_context(|| format!("Invalid date format '{}'. Use YYYY-MM-DD", date_str))
    })
    .transpose()
}

/// Resolve the month to display, defaulting each part to today's
pub fn resolve_cursor(month: Option<u32>, year: Option<i32>, today: NaiveDate) -> Result<DisplayCursor> {
    let month = month.unwrap_or_else(|| today.month());
    if !(1..=12).contains(&month) {
        bail!("Invalid month '{}'. Use 1-12", month);
    }
    let year = year.unwrap_or_else(|| today.year());
    let (min_year, max_year) = (DisplayCursor::min_year(), DisplayCursor::max_year());
    if !(min_year..=max_year).contains(&year) {
        bail!("Invalid year '{}'. Use {} to {}", year, min_year, max_year);
    }
    Ok(DisplayCursor::new(month, year))
}
