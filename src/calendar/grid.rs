use chrono::{Datelike, Days, NaiveDate};

use super::math::DisplayCursor;

/// Days per week row
pub const GRID_COLUMNS: usize = 7;
/// Week rows per grid
pub const GRID_ROWS: usize = 6;
/// Total cells in a grid, independent of how many weeks the month spans
pub const GRID_CELLS: usize = GRID_COLUMNS * GRID_ROWS;

/// One day slot in the 6x7 layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub date: NaiveDate,
    /// False for leading/trailing days pulled from adjacent months
    pub in_current_month: bool,
}

/// Sunday-first, row-major month grid of 42 consecutive days
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    cursor: DisplayCursor,
    cells: Vec<GridCell>,
}

impl CalendarGrid {
    /// Build the grid for `(month, year)`
    ///
    /// The first cell is the Sunday on or before the 1st of the month; the
    /// remaining 41 cells follow one day at a time. Out of range years are
    /// clamped the way [`DisplayCursor::new`] clamps them.
    pub fn build(month: u32, year: i32) -> Self {
        let cursor = DisplayCursor::new(month, year);
        let first = cursor.first_day();
        let leading = first.weekday().num_days_from_sunday();
        let start = first
            .checked_sub_days(Days::new(u64::from(leading)))
            .unwrap_or(first);

        let cells = start
            .iter_days()
            .take(GRID_CELLS)
            .map(|date| GridCell {
                date,
                in_current_month: cursor.contains(date),
            })
            .collect();

        Self { cursor, cells }
    }

    /// Build the grid for a cursor
    pub fn for_cursor(cursor: DisplayCursor) -> Self {
        Self::build(cursor.month(), cursor.year())
    }

    /// The month/year this grid was built for (after clamping)
    pub fn cursor(&self) -> DisplayCursor {
        self.cursor
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&GridCell> {
        self.cells.get(index)
    }

    /// Week rows, Sunday first
    pub fn rows(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(GRID_COLUMNS)
    }

    pub fn first(&self) -> &GridCell {
        &self.cells[0]
    }

    pub fn last(&self) -> &GridCell {
        &self.cells[self.cells.len() - 1]
    }

    /// Index of `date` within the grid, if shown
    pub fn position_of(&self, date: NaiveDate) -> Option<usize> {
        let offset = (date - self.first().date).num_days();
        usize::try_from(offset).ok().filter(|&i| i < self.cells.len())
    }
}
