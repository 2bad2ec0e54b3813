//! Calendar core: date arithmetic and month grid construction
//!
//! Everything here is pure and independent of the terminal front end.

pub mod error;
pub mod grid;
pub mod labels;
pub mod math;

pub use error::{CalendarError, CalendarResult};
pub use grid::{CalendarGrid, GridCell, GRID_CELLS, GRID_COLUMNS, GRID_ROWS};
pub use labels::CalendarLabels;
pub use math::{
    days_in_month, is_same_day, is_same_month, next_month, parse_date, previous_month,
    to_iso_date, DisplayCursor, ISO_DATE_FORMAT,
};
