/// CalendarWidget - month grid with a navigation header
///
/// Fixed dimensions: 30 columns × 10 rows
/// - Border: rounded box
/// - Row 1: previous arrow, "Month Year" title, next arrow
/// - Row 2: upper-cased weekday labels, Sunday first
/// - Rows 3-8: the 42 day cells, 4 columns each
use chrono::Datelike;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use super::{frame, RenderableWidget};
use crate::calendar::GridCell;
use crate::config::ThemeConfig;
use crate::formatting::{center_offset, right_align};
use crate::tui::components::{CalendarView, CellMarker};
use crate::tui::layout::{CalendarHit, CalendarLayout, CALENDAR_HEIGHT, CALENDAR_WIDTH, CELL_WIDTH};

/// Digits are right-aligned in the first 3 columns of each cell
const DAY_WIDTH: usize = CELL_WIDTH as usize - 1;

#[derive(Debug)]
pub struct CalendarWidget<'a> {
    view: &'a CalendarView,
    /// Arrow currently held down
    pressed: Option<CalendarHit>,
}

impl<'a> CalendarWidget<'a> {
    pub fn new(view: &'a CalendarView, pressed: Option<CalendarHit>) -> Self {
        Self { view, pressed }
    }

    fn arrow_style(&self, arrow: CalendarHit, theme: &ThemeConfig) -> Style {
        if self.pressed == Some(arrow) {
            Style::default().fg(theme.pressed_fg()).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.selection_fg)
        }
    }

    fn cell_style(&self, cell: &GridCell, theme: &ThemeConfig) -> Style {
        match self.view.cell_marker(cell) {
            CellMarker::Selected => Style::default()
                .fg(theme.selection_fg)
                .add_modifier(Modifier::REVERSED | Modifier::BOLD),
            CellMarker::Today => Style::default().fg(theme.today_fg).add_modifier(Modifier::BOLD),
            CellMarker::Plain if !cell.in_current_month => Style::default().fg(theme.outside_month_fg),
            CellMarker::Plain => Style::default(),
        }
    }
}

impl RenderableWidget for CalendarWidget<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer, theme: &ThemeConfig) {
        if area.width < CALENDAR_WIDTH || area.height < CALENDAR_HEIGHT {
            return; // Not enough space
        }

        let layout = CalendarLayout::new(area.x, area.y);
        let box_chars = theme.box_chars();
        frame(&box_chars, Style::default()).render(layout.outer, buf);

        // Header
        buf.set_string(
            layout.previous.x + 1,
            layout.previous.y,
            &box_chars.previous,
            self.arrow_style(CalendarHit::Previous, theme),
        );
        buf.set_string(
            layout.next.x + 1,
            layout.next.y,
            &box_chars.next,
            self.arrow_style(CalendarHit::Next, theme),
        );

        let title = self.view.title();
        let offset = center_offset(&title, layout.title.width as usize) as u16;
        buf.set_stringn(
            layout.title.x + offset,
            layout.title.y,
            &title,
            (layout.title.width - offset) as usize,
            Style::default().add_modifier(Modifier::BOLD),
        );

        // Weekday row, upper-cased
        for (column, name) in self.view.labels().weekdays().iter().enumerate() {
            buf.set_string(
                layout.weekdays.x + column as u16 * CELL_WIDTH,
                layout.weekdays.y,
                right_align(&name.to_uppercase(), DAY_WIDTH),
                Style::default().add_modifier(Modifier::DIM),
            );
        }

        // Day cells
        let grid = self.view.grid();
        for (cell, rect) in grid.cells().iter().zip(layout.cells.iter()) {
            buf.set_string(
                rect.x,
                rect.y,
                format!("{:>width$}", cell.date.day(), width = DAY_WIDTH),
                self.cell_style(cell, theme),
            );
        }
    }
}
