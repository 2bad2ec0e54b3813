use chrono::{DateTime, Datelike, Local, Months, NaiveDate, NaiveDateTime};

use super::error::{CalendarError, CalendarResult};

/// Canonical `YYYY-MM-DD` form used at every string boundary
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Formats accepted by [`parse_date`] besides RFC 3339 timestamps
const ACCEPTED_DATE_FORMATS: [&str; 3] = [ISO_DATE_FORMAT, "%Y/%m/%d", "%Y / %m / %d"];

/// Month/year pair currently shown by a calendar
///
/// The month is always within `1..=12` and the year within the range chrono
/// can represent, keeping a year of headroom on each side for the grid's
/// spill-over rows. Construction normalises any month number by carrying
/// whole years and clamps the result into that range. A navigation step that
/// would leave the range leaves the cursor where it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayCursor {
    month: u32,
    year: i32,
}

impl DisplayCursor {
    pub fn new(month: u32, year: i32) -> Self {
        Self::normalized(i64::from(month), i64::from(year))
    }

    /// Cursor pointing at the month containing `date`
    pub fn from_date(date: NaiveDate) -> Self {
        Self::new(date.month(), date.year())
    }

    /// Earliest year a cursor can show
    pub fn min_year() -> i32 {
        NaiveDate::MIN.year() + 1
    }

    /// Latest year a cursor can show
    pub fn max_year() -> i32 {
        NaiveDate::MAX.year() - 1
    }

    fn normalized(month: i64, year: i64) -> Self {
        let zero_based = month - 1;
        let year = year + zero_based.div_euclid(12);
        if year < i64::from(Self::min_year()) {
            return Self {
                month: 1,
                year: Self::min_year(),
            };
        }
        if year > i64::from(Self::max_year()) {
            return Self {
                month: 12,
                year: Self::max_year(),
            };
        }
        Self {
            month: (zero_based.rem_euclid(12) + 1) as u32,
            year: year as i32,
        }
    }

    /// Move by `months`, staying put when the target is out of range
    fn shifted(self, months: i64) -> Self {
        let index = i64::from(self.year) * 12 + i64::from(self.month) - 1 + months;
        let year = index.div_euclid(12);
        if year < i64::from(Self::min_year()) || year > i64::from(Self::max_year()) {
            return self;
        }
        Self {
            month: (index.rem_euclid(12) + 1) as u32,
            year: year as i32,
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn next_month(self) -> Self {
        self.shifted(1)
    }

    pub fn previous_month(self) -> Self {
        self.shifted(-1)
    }

    pub fn next_year(self) -> Self {
        self.shifted(12)
    }

    pub fn previous_year(self) -> Self {
        self.shifted(-12)
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Whether `date` falls inside this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.month() == self.month && date.year() == self.year
    }
}

/// True iff both dates are present and denote the same calendar day
pub fn is_same_day(a: Option<NaiveDate>, b: Option<NaiveDate>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}

/// True iff both dates are present and share month and year
pub fn is_same_month(a: Option<NaiveDate>, b: Option<NaiveDate>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.year() == b.year() && a.month() == b.month(),
        _ => false,
    }
}

/// Format a date as `YYYY-MM-DD`
///
/// Callers at a boundary where the date may be missing should check for it
/// first; an absent date is reported as [`CalendarError::InvalidDate`].
pub fn to_iso_date(date: Option<NaiveDate>) -> CalendarResult<String> {
    date.map(|d| d.format(ISO_DATE_FORMAT).to_string())
        .ok_or(CalendarError::InvalidDate)
}

/// Parse a loosely formatted date string
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, the picker display form
/// `YYYY / MM / DD`, and RFC 3339 timestamps (converted to the local day).
/// Anything else, including the empty string, is treated as absent.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    for format in ACCEPTED_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            return Some(date);
        }
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(input) {
        return Some(timestamp.with_timezone(&Local).date_naive());
    }

    NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S")
        .map(|dt| dt.date())
        .ok()
}

/// Month after `(month, year)`, carrying December into January of the next year
pub fn next_month(month: u32, year: i32) -> DisplayCursor {
    DisplayCursor::new(month, year).next_month()
}

/// Month before `(month, year)`, carrying January into December of the previous year
pub fn previous_month(month: u32, year: i32) -> DisplayCursor {
    DisplayCursor::new(month, year).previous_month()
}

/// Number of days in the given month (after clamping like [`DisplayCursor::new`])
pub fn days_in_month(month: u32, year: i32) -> u32 {
    let start = DisplayCursor::new(month, year).first_day();
    start
        .checked_add_months(Months::new(1))
        .map_or(0, |end| (end - start).num_days() as u32)
}
