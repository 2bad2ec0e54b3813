/// DatePickerWidget - label, read-only input and the dropdown calendar
///
/// Fixed width of 30 columns. Height is 4 rows closed and 14 rows open.
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use super::{frame, CalendarWidget, RenderableWidget};
use crate::config::ThemeConfig;
use crate::tui::components::{DatePickerView, PLACEHOLDER};
use crate::tui::layout::{CalendarHit, PickerLayout};

#[derive(Debug)]
pub struct DatePickerWidget<'a> {
    picker: &'a DatePickerView,
    pressed: Option<CalendarHit>,
}

impl<'a> DatePickerWidget<'a> {
    pub fn new(picker: &'a DatePickerView, pressed: Option<CalendarHit>) -> Self {
        Self { picker, pressed }
    }
}

impl RenderableWidget for DatePickerWidget<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer, theme: &ThemeConfig) {
        let layout = PickerLayout::new(area, self.picker.is_open());
        if !layout.fits(area) {
            return; // Not enough space
        }
        let box_chars = theme.box_chars();

        buf.set_stringn(
            layout.label.x,
            layout.label.y,
            self.picker.label(),
            layout.label.width as usize,
            Style::default().add_modifier(Modifier::BOLD),
        );

        let input = layout.input;
        let border_style = if self.picker.is_open() {
            Style::default().fg(theme.selection_fg)
        } else {
            Style::default()
        };
        frame(&box_chars, border_style).render(input, buf);

        let text = self.picker.display_text();
        let text_width = input.width.saturating_sub(6) as usize;
        if text.is_empty() {
            buf.set_stringn(
                input.x + 2,
                input.y + 1,
                PLACEHOLDER,
                text_width,
                Style::default().fg(theme.outside_month_fg),
            );
        } else {
            buf.set_stringn(input.x + 2, input.y + 1, &text, text_width, Style::default());
        }

        let indicator = if self.picker.is_open() {
            &box_chars.dropdown_open
        } else {
            &box_chars.dropdown_closed
        };
        buf.set_string(input.right() - 3, input.y + 1, indicator, border_style);

        if let (Some(calendar), Some(calendar_layout)) = (self.picker.calendar(), layout.calendar.as_ref()) {
            CalendarWidget::new(calendar, self.pressed).render(calendar_layout.outer, buf, theme);
        }
    }
}
