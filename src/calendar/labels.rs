use super::error::{CalendarError, CalendarResult};

const DEFAULT_WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const DEFAULT_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Weekday and month names supplied to the calendar by its caller
///
/// Weekdays are Sunday-first to match the grid's column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarLabels {
    weekdays: [String; 7],
    months: [String; 12],
}

impl Default for CalendarLabels {
    fn default() -> Self {
        Self {
            weekdays: DEFAULT_WEEKDAYS.map(String::from),
            months: DEFAULT_MONTHS.map(String::from),
        }
    }
}

impl CalendarLabels {
    /// Build labels from caller-provided lists, checking their lengths
    pub fn from_lists(weekdays: &[String], months: &[String]) -> CalendarResult<Self> {
        let weekdays: [String; 7] =
            weekdays
                .to_vec()
                .try_into()
                .map_err(|v: Vec<String>| CalendarError::InvalidLabels {
                    kind: "weekday",
                    expected: 7,
                    found: v.len(),
                })?;
        let months: [String; 12] =
            months
                .to_vec()
                .try_into()
                .map_err(|v: Vec<String>| CalendarError::InvalidLabels {
                    kind: "month",
                    expected: 12,
                    found: v.len(),
                })?;
        Ok(Self { weekdays, months })
    }

    pub fn weekdays(&self) -> &[String; 7] {
        &self.weekdays
    }

    pub fn months(&self) -> &[String; 12] {
        &self.months
    }

    /// Name for a 1-based month
    ///
    /// Out-of-range months are clamped rather than rejected so a header can
    /// always be drawn.
    pub fn month_name(&self, month: u32) -> &str {
        let index = month.clamp(1, 12) as usize - 1;
        &self.months[index]
    }
}
