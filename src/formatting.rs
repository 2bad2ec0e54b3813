use ratatui::symbols::border;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Frame drawn with plain ASCII
pub const ASCII_BORDER: border::Set = border::Set {
    top_left: "+",
    top_right: "+",
    bottom_left: "+",
    bottom_right: "+",
    vertical_left: "|",
    vertical_right: "|",
    horizontal_top: "-",
    horizontal_bottom: "-",
};

/// Box-drawing and arrow characters
#[derive(Debug, Clone, PartialEq)]
pub struct BoxChars {
    pub border: border::Set,
    pub horizontal: String,
    pub double_horizontal: String,
    pub previous: String,
    pub next: String,
    pub dropdown_closed: String,
    pub dropdown_open: String,
}

impl BoxChars {
    pub fn unicode() -> Self {
        Self {
            border: border::ROUNDED,
            horizontal: "─".to_string(),
            double_horizontal: "═".to_string(),
            previous: "◀".to_string(),
            next: "▶".to_string(),
            dropdown_closed: "▼".to_string(),
            dropdown_open: "▲".to_string(),
        }
    }

    pub fn ascii() -> Self {
        Self {
            border: ASCII_BORDER,
            horizontal: "-".to_string(),
            double_horizontal: "=".to_string(),
            previous: "<".to_string(),
            next: ">".to_string(),
            dropdown_closed: "v".to_string(),
            dropdown_open: "^".to_string(),
        }
    }

    pub fn from_use_unicode(use_unicode: bool) -> Self {
        if use_unicode {
            Self::unicode()
        } else {
            Self::ascii()
        }
    }
}

/// Format a header with text and underline
///
/// # Arguments
/// * `text` - The header text to display
/// * `double_line` - If true, uses double-line (═/=), otherwise single-line (─/-)
/// * `box_chars` - Characters to draw the underline with
///
/// # Returns
/// The header text and an underline matching its display width
pub fn format_header(text: &str, double_line: bool, box_chars: &BoxChars) -> String {
    let separator_char = if double_line {
        &box_chars.double_horizontal
    } else {
        &box_chars.horizontal
    };
    format!("{}\n{}\n", text, separator_char.repeat(text.width()))
}

/// Left padding that centres `text` within `width` columns
pub fn center_offset(text: &str, width: usize) -> usize {
    width.saturating_sub(text.width()) / 2
}

/// Right-align `text` in a slot of `width` columns, truncating if needed
pub fn right_align(text: &str, width: usize) -> String {
    let mut used = 0;
    let fitted: String = text
        .chars()
        .take_while(|c| {
            used += c.width().unwrap_or(0);
            used <= width
        })
        .collect();
    let padding = width.saturating_sub(fitted.width());
    format!("{}{}", " ".repeat(padding), fitted)
}
