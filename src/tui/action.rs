use chrono::NaiveDate;

/// Actions applied to a calendar's [`SelectionState`](super::state::SelectionState)
///
/// All selection changes and navigation go through these. They are
/// dispatched from:
/// - Pointer input (cell clicks, header arrows)
/// - Press-and-hold repeats
/// - External value synchronisation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Select a date (or clear the selection) and show its month
    SetDate(Option<NaiveDate>),
    GoToPreviousMonth,
    GoToNextMonth,
    GoToPreviousYear,
    GoToNextYear,
}

impl Action {
    /// Navigation action for the "previous" header arrow
    pub fn previous(shift: bool) -> Self {
        if shift {
            Self::GoToPreviousYear
        } else {
            Self::GoToPreviousMonth
        }
    }

    /// Navigation action for the "next" header arrow
    pub fn next(shift: bool) -> Self {
        if shift {
            Self::GoToNextYear
        } else {
            Self::GoToNextMonth
        }
    }
}
