use chrono::NaiveDate;
use tracing::debug;

use super::action::Action;
use super::component::Effect;
use super::state::SelectionState;
use crate::calendar::{is_same_day, DisplayCursor};

/// Pure selection reducer
///
/// Takes the current state and an action, returns the new state and the
/// effect to deliver. `today` is passed in rather than read from a clock so
/// the transition stays deterministic; it only matters when a selection is
/// cleared and the cursor needs somewhere to go.
///
/// Every transition that changes `selected` returns exactly one
/// `Effect::DateChanged`. Navigation never does.
pub fn reduce(state: SelectionState, action: &Action, today: NaiveDate) -> (SelectionState, Effect) {
    match *action {
        Action::SetDate(date) => {
            if same_selection(state.selected, date) {
                debug!("REDUCER: SetDate({:?}) matches current selection, ignoring", date);
                return (state, Effect::None);
            }
            let new_state = SelectionState::from_date(date, today);
            debug!("REDUCER: selected {:?}, cursor {:?}", new_state.selected, new_state.cursor);
            (new_state, Effect::DateChanged(date))
        }
        Action::GoToPreviousMonth => navigate(state, state.cursor.previous_month()),
        Action::GoToNextMonth => navigate(state, state.cursor.next_month()),
        Action::GoToPreviousYear => navigate(state, state.cursor.previous_year()),
        Action::GoToNextYear => navigate(state, state.cursor.next_year()),
    }
}

fn navigate(state: SelectionState, cursor: DisplayCursor) -> (SelectionState, Effect) {
    debug!("REDUCER: cursor {:?} -> {:?}", state.cursor, cursor);
    (SelectionState { cursor, ..state }, Effect::None)
}

/// Two selections are equal when both are absent or both name the same day
fn same_selection(a: Option<NaiveDate>, b: Option<NaiveDate>) -> bool {
    (a.is_none() && b.is_none()) || is_same_day(a, b)
}

/// Whether an externally controlled date really changed
///
/// Used to decide when a calendar must re-synchronise from its input.
/// Re-supplying the same day (or absent twice) is not a change, so internal
/// navigation survives unrelated updates.
pub fn controlled_input_changed(previous: Option<NaiveDate>, next: Option<NaiveDate>) -> bool {
    !same_selection(previous, next)
}
