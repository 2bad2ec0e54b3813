/// Widget-based rendering infrastructure for TUI
///
/// Widgets render themselves directly to a ratatui Buffer and can be tested
/// by rendering into a detached buffer.

#[cfg(test)]
pub mod testing;

pub mod calendar;
pub use calendar::CalendarWidget;

pub mod date_picker;
pub use date_picker::DatePickerWidget;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::Block,
};
use crate::config::ThemeConfig;
use crate::formatting::BoxChars;

/// Core trait for renderable widgets
///
/// Widgets render themselves directly to a ratatui Buffer, avoiding string-based
/// intermediate representations.
///
/// # Object Safety
///
/// This trait is object-safe, meaning you can use trait objects to store
/// different widget types in collections.
pub trait RenderableWidget {
    /// Render this widget into the provided buffer
    ///
    /// # Arguments
    ///
    /// * `area` - The rectangular area to render into
    /// * `buf` - The buffer to write to
    /// * `theme` - Colours and box characters
    fn render(&self, area: Rect, buf: &mut Buffer, theme: &ThemeConfig);
}

/// Bordered frame for the input box and the calendar
pub fn frame(box_chars: &BoxChars, style: Style) -> Block<'static> {
    Block::bordered().border_set(box_chars.border).border_style(style)
}
