//! General test utilities for TUI tests.
//!
//! Fixtures shared by the component, runtime and widget tests. For
//! widget-specific rendering helpers, see `crate::tui::widgets::testing`.
//!
//! # Usage
//!
//! ```rust
//! #[cfg(test)]
//! mod tests {
//!     use crate::tui::testing::*;
//!
//!     #[test]
//!     fn test_example() {
//!         let clock = fixture_clock();
//!         let mut queue = fixture_queue();
//!         // Build a view against the fixture day...
//!     }
//! }
//! ```

use chrono::NaiveDate;
use ratatui::buffer::Buffer;
use std::time::{Duration, Instant};

use crate::tui::clock::FixedClock;
use crate::tui::timers::TimerQueue;

/// Build a date, panicking on invalid input (acceptable in test code)
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Clock fixed at the start of Thursday 15 February 2024
pub fn fixture_clock() -> FixedClock {
    FixedClock::at_date(date(2024, 2, 15))
}

/// Empty timer queue starting now
pub fn fixture_queue() -> TimerQueue {
    TimerQueue::new(Instant::now())
}

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Helper to extract lines from buffer
pub fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area();
    (0..area.height)
        .map(|y| {
            (0..area.width)
                .map(|x| buf[(x, y)].symbol())
                .collect::<String>()
        })
        .collect()
}

/// Helper for buffer assertions
pub fn assert_buffer(buf: &Buffer, expected: &[&str]) {
    let actual = buffer_lines(buf);
    let buffer_width = buf.area().width as usize;

    assert_eq!(
        actual.len(),
        expected.len(),
        "Buffer height mismatch: expected {} lines, got {}",
        expected.len(),
        actual.len()
    );
    for (i, expected_line) in expected.iter().enumerate() {
        assert_eq!(
            actual[i].chars().count(),
            buffer_width,
            "Line {} width mismatch: expected {}, got {}",
            i,
            buffer_width,
            actual[i].chars().count()
        );
        assert_eq!(
            actual[i].trim_end(),
            expected_line.trim_end(),
            "Line {} mismatch:\nExpected: '{}'\nActual:   '{}'",
            i,
            expected_line,
            actual[i]
        );
    }
}
