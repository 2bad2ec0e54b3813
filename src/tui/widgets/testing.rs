/// Testing utilities for widget rendering
///
/// This module provides helper functions for testing widgets in isolation.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
};
use crate::config::ThemeConfig;
use super::RenderableWidget;

/// Theme with unicode box characters and fixed colours
pub fn test_theme() -> ThemeConfig {
    ThemeConfig {
        use_unicode: true,
        selection_fg: Color::Rgb(255, 200, 0), // Gold
        today_fg: Color::Cyan,
        outside_month_fg: Color::DarkGray,
        pressed_fg: None,
    }
}

/// Theme with ASCII box characters
///
/// Useful for tests that want predictable ASCII-only output.
pub fn test_theme_ascii() -> ThemeConfig {
    ThemeConfig {
        use_unicode: false,
        ..test_theme()
    }
}

/// Render a widget to a buffer and return it for testing
pub fn render_widget(
    widget: &impl RenderableWidget,
    width: u16,
    height: u16,
) -> Buffer {
    render_widget_with_theme(widget, width, height, &test_theme())
}

/// Render a widget to a buffer with a custom theme
pub fn render_widget_with_theme(
    widget: &impl RenderableWidget,
    width: u16,
    height: u16,
    theme: &ThemeConfig,
) -> Buffer {
    let mut buf = Buffer::empty(Rect::new(0, 0, width, height));
    let area = buf.area;
    widget.render(area, &mut buf, theme);
    buf
}

/// Convert a buffer to a string representation for snapshot testing
///
/// Each line of the buffer is converted to a string, preserving spacing.
pub fn buffer_to_string(buf: &Buffer) -> String {
    let area = buf.area();
    let mut output = String::new();

    for y in 0..area.height {
        for x in 0..area.width {
            let cell = &buf[(x, y)];
            output.push_str(cell.symbol());
        }
        if y < area.height - 1 {
            output.push('\n');
        }
    }

    output
}

/// Get the text content of a specific line in the buffer
pub fn buffer_line(buf: &Buffer, line: u16) -> String {
    let area = buf.area();
    let mut output = String::new();

    for x in 0..area.width {
        let cell = &buf[(x, line)];
        output.push_str(cell.symbol());
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Style;

    /// Simple test widget for testing the testing utilities
    struct TestWidget {
        text: String,
    }

    impl RenderableWidget for TestWidget {
        fn render(&self, area: Rect, buf: &mut Buffer, _theme: &ThemeConfig) {
            buf.set_string(area.x, area.y, &self.text, Style::default());
        }
    }

    #[test]
    fn test_render_widget() {
        let widget = TestWidget {
            text: "Hello".to_string(),
        };

        let buf = render_widget(&widget, 10, 1);

        assert_eq!(buf[(0, 0)].symbol(), "H");
        assert_eq!(buf[(4, 0)].symbol(), "o");
        assert_eq!(buffer_line(&buf, 0), "Hello     ");
    }

    #[test]
    fn test_buffer_to_string() {
        let widget = TestWidget {
            text: "Hi".to_string(),
        };

        let buf = render_widget(&widget, 3, 2);

        assert_eq!(buffer_to_string(&buf), "Hi \n   ");
    }
}
