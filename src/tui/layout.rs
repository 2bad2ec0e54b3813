/// Fixed geometry of the date picker and hit-testing for pointer events
///
/// The picker is laid out top-down from the origin of the terminal area:
/// - Label: 1 line
/// - Input: 3 lines (bordered)
/// - Calendar: 10 lines (bordered: header, weekdays, 6 week rows), only while open
///
/// Every calendar cell is `CELL_WIDTH` columns wide, so the calendar is
/// 7 × 4 = 28 columns plus borders.

use ratatui::layout::Rect;

use crate::calendar::{GRID_CELLS, GRID_COLUMNS, GRID_ROWS};

pub const CELL_WIDTH: u16 = 4;
pub const ARROW_WIDTH: u16 = 3;
pub const CALENDAR_WIDTH: u16 = GRID_COLUMNS as u16 * CELL_WIDTH + 2;
pub const CALENDAR_HEIGHT: u16 = GRID_ROWS as u16 + 4;
pub const PICKER_WIDTH: u16 = CALENDAR_WIDTH;
pub const INPUT_HEIGHT: u16 = 3;
pub const LABEL_HEIGHT: u16 = 1;

/// What a pointer landed on inside the calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarHit {
    Previous,
    Next,
    Cell(usize),
}

/// What a pointer landed on inside the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerHit {
    Input,
    Calendar(CalendarHit),
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

/// Areas of a calendar drawn at a given origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarLayout {
    pub outer: Rect,
    pub inner: Rect,
    pub previous: Rect,
    pub next: Rect,
    pub title: Rect,
    pub weekdays: Rect,
    pub cells: [Rect; GRID_CELLS],
}

impl CalendarLayout {
    pub fn new(x: u16, y: u16) -> Self {
        let outer = Rect::new(x, y, CALENDAR_WIDTH, CALENDAR_HEIGHT);
        let inner = Rect::new(x + 1, y + 1, CALENDAR_WIDTH - 2, CALENDAR_HEIGHT - 2);

        let header_y = inner.y;
        let previous = Rect::new(inner.x, header_y, ARROW_WIDTH, 1);
        let next = Rect::new(inner.right() - ARROW_WIDTH, header_y, ARROW_WIDTH, 1);
        let title = Rect::new(previous.right(), header_y, inner.width - 2 * ARROW_WIDTH, 1);
        let weekdays = Rect::new(inner.x, header_y + 1, inner.width, 1);

        let first_row = header_y + 2;
        let cells = std::array::from_fn(|i| {
            let column = (i % GRID_COLUMNS) as u16;
            let row = (i / GRID_COLUMNS) as u16;
            Rect::new(inner.x + column * CELL_WIDTH, first_row + row, CELL_WIDTH, 1)
        });

        Self {
            outer,
            inner,
            previous,
            next,
            title,
            weekdays,
            cells,
        }
    }

    pub fn hit(&self, column: u16, row: u16) -> Option<CalendarHit> {
        if !contains(self.inner, column, row) {
            return None;
        }
        if contains(self.previous, column, row) {
            return Some(CalendarHit::Previous);
        }
        if contains(self.next, column, row) {
            return Some(CalendarHit::Next);
        }
        self.cells
            .iter()
            .position(|cell| contains(*cell, column, row))
            .map(CalendarHit::Cell)
    }
}

/// Areas of the whole picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerLayout {
    pub label: Rect,
    pub input: Rect,
    pub calendar: Option<CalendarLayout>,
}

impl PickerLayout {
    pub fn new(area: Rect, open: bool) -> Self {
        let label = Rect::new(area.x, area.y, PICKER_WIDTH, LABEL_HEIGHT);
        let input = Rect::new(area.x, label.bottom(), PICKER_WIDTH, INPUT_HEIGHT);
        let calendar = open.then(|| CalendarLayout::new(area.x, input.bottom()));
        Self {
            label,
            input,
            calendar,
        }
    }

    /// Total height needed to draw everything
    pub fn height(&self) -> u16 {
        LABEL_HEIGHT + INPUT_HEIGHT + self.calendar.as_ref().map_or(0, |c| c.outer.height)
    }

    /// Whether the picker fits inside `area`
    pub fn fits(&self, area: Rect) -> bool {
        area.width >= PICKER_WIDTH && area.height >= self.height()
    }

    /// Whether a point lies on the input or the open calendar
    pub fn contains(&self, column: u16, row: u16) -> bool {
        contains(self.input, column, row)
            || self
                .calendar
                .as_ref()
                .is_some_and(|calendar| contains(calendar.outer, column, row))
    }

    pub fn hit(&self, column: u16, row: u16) -> Option<PickerHit> {
        if contains(self.input, column, row) {
            return Some(PickerHit::Input);
        }
        self.calendar
            .as_ref()
            .and_then(|calendar| calendar.hit(column, row))
            .map(PickerHit::Calendar)
    }
}
