use chrono::NaiveDate;
use tracing::debug;

use crate::calendar::{is_same_day, CalendarGrid, CalendarLabels, DisplayCursor, GridCell};
use crate::tui::action::Action;
use crate::tui::clock::{until_next_midnight, Clock};
use crate::tui::component::Effect;
use crate::tui::press::{PressAndHold, PressTiming};
use crate::tui::reducer::{controlled_input_changed, reduce};
use crate::tui::state::SelectionState;
use crate::tui::timers::{Scheduler, TimerId};

/// How a grid cell should be highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellMarker {
    Selected,
    Today,
    Plain,
}

/// Month calendar: selection state, grid and header navigation
///
/// The view owns its [`SelectionState`] and only changes it by running
/// actions through [`reduce`]. Selection changes surface as
/// `Effect::DateChanged` for the owner to deliver.
///
/// Two kinds of timers belong to a view: the press-and-hold session on the
/// header arrows and the midnight rollover that refreshes `today`. Both are
/// cancelled by [`teardown`](Self::teardown), which the owner must call
/// before dropping the view.
#[derive(Debug)]
pub struct CalendarView {
    selection: SelectionState,
    today: NaiveDate,
    labels: CalendarLabels,
    press: PressAndHold<Action>,
    midnight_timer: Option<TimerId>,
    /// Last externally supplied date, for change detection
    external_date: Option<NaiveDate>,
}

impl CalendarView {
    pub fn new<S>(
        date: Option<NaiveDate>,
        labels: CalendarLabels,
        timing: PressTiming,
        clock: &dyn Clock,
        scheduler: &mut S,
    ) -> Self
    where
        S: Scheduler + ?Sized,
    {
        let today = clock.today();
        let midnight_timer = scheduler.set_timeout(until_next_midnight(clock.now()));
        debug!("CALENDAR: created with {:?}, today {}", date, today);

        Self {
            selection: SelectionState::from_date(date, today),
            today,
            labels,
            press: PressAndHold::new(timing),
            midnight_timer: Some(midnight_timer),
            external_date: date,
        }
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selection.selected
    }

    pub fn cursor(&self) -> DisplayCursor {
        self.selection.cursor
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn labels(&self) -> &CalendarLabels {
        &self.labels
    }

    /// Grid for the month currently displayed
    pub fn grid(&self) -> CalendarGrid {
        CalendarGrid::for_cursor(self.selection.cursor)
    }

    /// Header text, e.g. "February 2024"
    pub fn title(&self) -> String {
        let cursor = self.selection.cursor;
        format!("{} {}", self.labels.month_name(cursor.month()), cursor.year())
    }

    pub fn cell_marker(&self, cell: &GridCell) -> CellMarker {
        if is_same_day(Some(cell.date), self.selection.selected) {
            CellMarker::Selected
        } else if cell.date == self.today {
            CellMarker::Today
        } else {
            CellMarker::Plain
        }
    }

    /// Apply an action to the selection state
    pub fn dispatch(&mut self, action: Action) -> Effect {
        Self::apply(&mut self.selection, &action, self.today)
    }

    fn apply(selection: &mut SelectionState, action: &Action, today: NaiveDate) -> Effect {
        let (new_state, effect) = reduce(*selection, action, today);
        *selection = new_state;
        effect
    }

    /// Select a date, as when its cell is clicked
    pub fn select(&mut self, date: NaiveDate) -> Effect {
        self.dispatch(Action::SetDate(Some(date)))
    }

    /// Select the date in grid cell `index`
    pub fn select_cell(&mut self, index: usize) -> Effect {
        match self.grid().cell(index) {
            Some(cell) => self.select(cell.date),
            None => Effect::None,
        }
    }

    /// Re-synchronise from the externally controlled date
    ///
    /// Only a real change (per [`controlled_input_changed`]) resets the
    /// selection; otherwise any cursor drift from navigation is kept.
    pub fn set_external_date(&mut self, date: Option<NaiveDate>) -> Effect {
        if !controlled_input_changed(self.external_date, date) {
            return Effect::None;
        }
        debug!("CALENDAR: external date changed {:?} -> {:?}", self.external_date, date);
        self.external_date = date;
        self.dispatch(Action::SetDate(date))
    }

    /// Pointer down on the "previous" arrow; shift steps by year
    pub fn press_previous<S>(&mut self, shift: bool, scheduler: &mut S) -> Effect
    where
        S: Scheduler + ?Sized,
    {
        self.start_press(Action::previous(shift), scheduler)
    }

    /// Pointer down on the "next" arrow; shift steps by year
    pub fn press_next<S>(&mut self, shift: bool, scheduler: &mut S) -> Effect
    where
        S: Scheduler + ?Sized,
    {
        self.start_press(Action::next(shift), scheduler)
    }

    /// Pointer up or leave on an arrow
    pub fn release<S>(&mut self, scheduler: &mut S)
    where
        S: Scheduler + ?Sized,
    {
        self.press.stop(scheduler);
    }

    fn start_press<S>(&mut self, action: Action, scheduler: &mut S) -> Effect
    where
        S: Scheduler + ?Sized,
    {
        let today = self.today;
        let selection = &mut self.selection;
        let mut effect = Effect::None;
        self.press.start(action, scheduler, |action| {
            effect = std::mem::take(&mut effect).and(Self::apply(selection, action, today));
        });
        effect
    }

    /// Handle a fired timer
    ///
    /// Returns `None` when the timer belongs to someone else.
    pub fn on_timer<S>(&mut self, id: TimerId, scheduler: &mut S, clock: &dyn Clock) -> Option<Effect>
    where
        S: Scheduler + ?Sized,
    {
        if self.midnight_timer == Some(id) {
            self.today = clock.today();
            self.midnight_timer = Some(scheduler.set_timeout(until_next_midnight(clock.now())));
            debug!("CALENDAR: midnight rollover, today is {}", self.today);
            return Some(Effect::None);
        }

        let today = self.today;
        let selection = &mut self.selection;
        let mut effect = Effect::None;
        let handled = self.press.on_timer(id, scheduler, |action| {
            effect = std::mem::take(&mut effect).and(Self::apply(selection, action, today));
        });
        handled.then_some(effect)
    }

    /// Cancel every timer this view owns
    pub fn teardown<S>(&mut self, scheduler: &mut S)
    where
        S: Scheduler + ?Sized,
    {
        self.press.stop(scheduler);
        if let Some(id) = self.midnight_timer.take() {
            scheduler.clear(id);
        }
        debug!("CALENDAR: torn down");
    }
}
