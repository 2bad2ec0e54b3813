use anyhow::Result;
use chrono::{Datelike, NaiveDate};

use crate::calendar::{days_in_month, CalendarGrid, CalendarLabels, GridCell};
use crate::commands::resolve_cursor;
use crate::config::Config;
use crate::formatting::{format_header, right_align, BoxChars};
use crate::tui::clock::{Clock, SystemClock};

/// Columns for a day number; one more column holds the today marker
const SLOT_WIDTH: usize = 4;

fn format_cell(cell: &GridCell, today: NaiveDate) -> String {
    let day = cell.date.day();
    let body = if cell.in_current_month {
        format!("{:>width$}", day, width = SLOT_WIDTH)
    } else {
        format!("{:>width$}", format!("({})", day), width = SLOT_WIDTH)
    };
    let marker = if cell.date == today { '*' } else { ' ' };
    format!("{}{}", body, marker)
}

/// Render a month grid as plain text
///
/// Adjacent-month days are wrapped in parentheses and today is marked with `*`.
pub fn format_grid(grid: &CalendarGrid, labels: &CalendarLabels, today: NaiveDate, box_chars: &BoxChars) -> String {
    let cursor = grid.cursor();
    let title = format!("{} {}", labels.month_name(cursor.month()), cursor.year());
    let mut output = format_header(&title, true, box_chars);

    let weekdays: String = labels
        .weekdays()
        .iter()
        .map(|name| format!("{:>width$} ", right_align(name, SLOT_WIDTH - 1), width = SLOT_WIDTH))
        .collect();
    output.push_str(weekdays.trim_end());
    output.push('\n');

    for row in grid.rows() {
        let line: String = row.iter().map(|cell| format_cell(cell, today)).collect();
        output.push_str(line.trim_end());
        output.push('\n');
    }

    output.push_str(&format!("\n{} days\n", days_in_month(cursor.month(), cursor.year())));
    output
}

pub fn run(month: Option<u32>, year: Option<i32>, config: &Config) -> Result<()> {
    let today = SystemClock.today();
    let cursor = resolve_cursor(month, year, today)?;
    let grid = CalendarGrid::for_cursor(cursor);
    let labels = config.labels.calendar_labels();

    print!("{}", format_grid(&grid, &labels, today, &config.theme.box_chars()));
    Ok(())
}
