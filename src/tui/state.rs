use chrono::NaiveDate;

use crate::calendar::DisplayCursor;

/// Date selection state owned by one calendar instance
///
/// `cursor` is always defined. It starts on the selected date's month but
/// drifts freely with navigation, so browsing never changes `selected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionState {
    pub selected: Option<NaiveDate>,
    pub cursor: DisplayCursor,
}

impl SelectionState {
    /// Resolve the state for an optional date
    ///
    /// Without a date nothing is selected and the cursor shows `today`'s month.
    pub fn from_date(date: Option<NaiveDate>, today: NaiveDate) -> Self {
        Self {
            selected: date,
            cursor: DisplayCursor::from_date(date.unwrap_or(today)),
        }
    }
}
