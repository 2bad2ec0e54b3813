use chrono::NaiveDate;
use tracing::debug;

use super::calendar_view::CalendarView;
use crate::calendar::{parse_date, to_iso_date, CalendarLabels};
use crate::tui::clock::Clock;
use crate::tui::component::Effect;
use crate::tui::press::PressTiming;
use crate::tui::timers::{Scheduler, TimerId};

/// Label shown above the input when the caller gives none
pub const DEFAULT_LABEL: &str = "Enter Date";

/// Input text shown while no date is set
pub const PLACEHOLDER: &str = "YYYY / MM / DD";

/// Normalise an external value into ISO form; unparseable input is absent
fn normalize_value(value: Option<&str>) -> Option<String> {
    value.and_then(parse_date).and_then(|d| to_iso_date(Some(d)).ok())
}

/// Read-only date input with a dropdown calendar
///
/// The value is held as an ISO `YYYY-MM-DD` string. The calendar only
/// exists while the dropdown is open; it is built from the current value on
/// open and torn down on close, so no timers outlive the dropdown.
#[derive(Debug)]
pub struct DatePickerView {
    label: String,
    value: Option<String>,
    /// Last externally supplied value, normalised
    external_value: Option<String>,
    calendar: Option<CalendarView>,
    labels: CalendarLabels,
    timing: PressTiming,
}

impl DatePickerView {
    pub fn new(
        label: Option<String>,
        value: Option<&str>,
        labels: CalendarLabels,
        timing: PressTiming,
    ) -> Self {
        let value = normalize_value(value);
        Self {
            label: label.unwrap_or_else(|| DEFAULT_LABEL.to_string()),
            external_value: value.clone(),
            value,
            calendar: None,
            labels,
            timing,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Current ISO value
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Current value as a date
    pub fn date(&self) -> Option<NaiveDate> {
        self.value.as_deref().and_then(parse_date)
    }

    pub fn is_open(&self) -> bool {
        self.calendar.is_some()
    }

    pub fn calendar(&self) -> Option<&CalendarView> {
        self.calendar.as_ref()
    }

    /// Text for the input field, `YYYY / MM / DD` or empty
    pub fn display_text(&self) -> String {
        self.value
            .as_deref()
            .map(|v| v.split('-').collect::<Vec<_>>().join(" / "))
            .unwrap_or_default()
    }

    /// Apply a new externally controlled value
    ///
    /// Re-supplying the same day is ignored. An unparseable value clears
    /// the picker.
    pub fn set_value(&mut self, value: Option<&str>) -> Effect {
        let normalized = normalize_value(value);
        if normalized == self.external_value {
            return Effect::None;
        }
        debug!("PICKER: external value {:?} -> {:?}", self.external_value, normalized);
        self.external_value = normalized.clone();

        let date = normalized.as_deref().and_then(parse_date);
        if let Some(calendar) = self.calendar.as_mut() {
            // Its DateChanged echo matches the value stored below
            calendar.set_external_date(date);
        }

        self.store(normalized)
    }

    /// Empty the value
    pub fn clear(&mut self) -> Effect {
        if let Some(calendar) = self.calendar.as_mut() {
            calendar.set_external_date(None);
        }
        self.store(None)
    }

    fn store(&mut self, value: Option<String>) -> Effect {
        if value == self.value {
            return Effect::None;
        }
        self.value = value.clone();
        debug!("PICKER: value is now {:?}", self.value);
        Effect::ValueChanged(value)
    }

    pub fn open<S>(&mut self, clock: &dyn Clock, scheduler: &mut S)
    where
        S: Scheduler + ?Sized,
    {
        if self.calendar.is_none() {
            self.calendar = Some(CalendarView::new(
                self.date(),
                self.labels.clone(),
                self.timing,
                clock,
                scheduler,
            ));
            debug!("PICKER: dropdown opened");
        }
    }

    pub fn close<S>(&mut self, scheduler: &mut S)
    where
        S: Scheduler + ?Sized,
    {
        if let Some(mut calendar) = self.calendar.take() {
            calendar.teardown(scheduler);
            debug!("PICKER: dropdown closed");
        }
    }

    pub fn toggle<S>(&mut self, clock: &dyn Clock, scheduler: &mut S)
    where
        S: Scheduler + ?Sized,
    {
        if self.is_open() {
            self.close(scheduler);
        } else {
            self.open(clock, scheduler);
        }
    }

    /// Consume effects emitted by the calendar
    ///
    /// A selection different from the stored value is stored as ISO and
    /// closes the dropdown. The same selection again is a no-op.
    pub fn handle_calendar_effect<S>(&mut self, effect: Effect, scheduler: &mut S) -> Effect
    where
        S: Scheduler + ?Sized,
    {
        let mut out = Effect::None;
        for effect in effect.into_vec() {
            if let Effect::DateChanged(date) = effect {
                let value = date.and_then(|d| to_iso_date(Some(d)).ok());
                if value != self.value {
                    out = out.and(self.store(value));
                    self.close(scheduler);
                }
            }
        }
        out
    }

    /// Click on grid cell `index` of the open calendar
    pub fn select_cell<S>(&mut self, index: usize, scheduler: &mut S) -> Effect
    where
        S: Scheduler + ?Sized,
    {
        let effect = match self.calendar.as_mut() {
            Some(calendar) => calendar.select_cell(index),
            None => return Effect::None,
        };
        self.handle_calendar_effect(effect, scheduler)
    }

    /// Pointer down on the calendar's "previous" arrow
    pub fn press_previous<S>(&mut self, shift: bool, scheduler: &mut S) -> Effect
    where
        S: Scheduler + ?Sized,
    {
        let effect = match self.calendar.as_mut() {
            Some(calendar) => calendar.press_previous(shift, scheduler),
            None => return Effect::None,
        };
        self.handle_calendar_effect(effect, scheduler)
    }

    /// Pointer down on the calendar's "next" arrow
    pub fn press_next<S>(&mut self, shift: bool, scheduler: &mut S) -> Effect
    where
        S: Scheduler + ?Sized,
    {
        let effect = match self.calendar.as_mut() {
            Some(calendar) => calendar.press_next(shift, scheduler),
            None => return Effect::None,
        };
        self.handle_calendar_effect(effect, scheduler)
    }

    /// Pointer up or leave on an arrow
    pub fn release<S>(&mut self, scheduler: &mut S)
    where
        S: Scheduler + ?Sized,
    {
        if let Some(calendar) = self.calendar.as_mut() {
            calendar.release(scheduler);
        }
    }

    /// Route a fired timer to the open calendar
    pub fn on_timer<S>(&mut self, id: TimerId, scheduler: &mut S, clock: &dyn Clock) -> Option<Effect>
    where
        S: Scheduler + ?Sized,
    {
        let effect = self.calendar.as_mut()?.on_timer(id, scheduler, clock)?;
        Some(self.handle_calendar_effect(effect, scheduler))
    }

    /// Close the dropdown and release its timers
    pub fn teardown<S>(&mut self, scheduler: &mut S)
    where
        S: Scheduler + ?Sized,
    {
        self.close(scheduler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::DisplayCursor;
    use crate::tui::testing::{date, fixture_clock, fixture_queue, ms};

    fn picker(value: Option<&str>) -> DatePickerView {
        DatePickerView::new(None, value, CalendarLabels::default(), PressTiming::default())
    }

    #[test]
    fn test_defaults() {
        let picker = picker(None);
        assert_eq!(picker.label(), DEFAULT_LABEL);
        assert_eq!(picker.value(), None);
        assert_eq!(picker.display_text(), "");
        assert!(!picker.is_open());
    }

    #[test]
    fn test_value_is_normalised_to_iso() {
        let picker = picker(Some("2024/02/05"));
        assert_eq!(picker.value(), Some("2024-02-05"));
        assert_eq!(picker.display_text(), "2024 / 02 / 05");
    }

    #[test]
    fn test_unparseable_value_is_absent() {
        let picker = picker(Some("tomorrow-ish"));
        assert_eq!(picker.value(), None);
    }

    #[test]
    fn test_open_builds_calendar_from_value() {
        let clock = fixture_clock();
        let mut queue = fixture_queue();
        let mut picker = picker(Some("2019-07-04"));

        picker.open(&clock, &mut queue);

        let calendar = picker.calendar().unwrap();
        assert_eq!(calendar.selected(), Some(date(2019, 7, 4)));
        assert_eq!(calendar.cursor(), DisplayCursor::new(7, 2019));
    }

    #[test]
    fn test_toggle_closes_and_releases_timers() {
        let clock = fixture_clock();
        let mut queue = fixture_queue();
        let mut picker = picker(None);

        picker.toggle(&clock, &mut queue);
        assert!(picker.is_open());
        picker.press_next(false, &mut queue);
        assert!(!queue.is_empty());

        picker.toggle(&clock, &mut queue);
        assert!(!picker.is_open());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_selecting_cell_stores_value_and_closes() {
        let clock = fixture_clock();
        let mut queue = fixture_queue();
        let mut picker = picker(None);
        picker.open(&clock, &mut queue);

        // February 2024: index 18 is the 15th
        let effect = picker.select_cell(18, &mut queue);

        assert_eq!(effect, Effect::ValueChanged(Some("2024-02-15".to_string())));
        assert_eq!(picker.value(), Some("2024-02-15"));
        assert!(!picker.is_open());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_reselecting_same_date_keeps_dropdown_open() {
        let clock = fixture_clock();
        let mut queue = fixture_queue();
        let mut picker = picker(Some("2024-02-15"));
        picker.open(&clock, &mut queue);

        let effect = picker.select_cell(18, &mut queue);

        assert!(effect.is_none());
        assert!(picker.is_open());
    }

    #[test]
    fn test_external_value_change_emits_once() {
        let mut picker = picker(Some("2024-02-15"));

        assert!(picker.set_value(Some("2024-02-15")).is_none());
        assert!(picker.set_value(Some("2024/02/15")).is_none());

        let effect = picker.set_value(Some("2024-03-01"));
        assert_eq!(effect, Effect::ValueChanged(Some("2024-03-01".to_string())));

        let effect = picker.set_value(Some("garbage"));
        assert_eq!(effect, Effect::ValueChanged(None));
        assert_eq!(picker.display_text(), "");
    }

    #[test]
    fn test_external_value_resyncs_open_calendar() {
        let clock = fixture_clock();
        let mut queue = fixture_queue();
        let mut picker = picker(None);
        picker.open(&clock, &mut queue);

        picker.set_value(Some("2030-12-25"));

        let calendar = picker.calendar().unwrap();
        assert_eq!(calendar.selected(), Some(date(2030, 12, 25)));
        assert!(picker.is_open());
    }

    #[test]
    fn test_clear() {
        let clock = fixture_clock();
        let mut queue = fixture_queue();
        let mut picker = picker(Some("2024-02-15"));
        picker.open(&clock, &mut queue);

        assert_eq!(picker.clear(), Effect::ValueChanged(None));
        assert_eq!(picker.calendar().unwrap().selected(), None);
        assert!(picker.clear().is_none());
    }

    #[test]
    fn test_held_arrow_navigates_without_changing_value() {
        let clock = fixture_clock();
        let mut queue = fixture_queue();
        let mut picker = picker(Some("2024-02-15"));
        picker.open(&clock, &mut queue);

        picker.press_previous(false, &mut queue);
        let mut effects = Vec::new();
        queue.advance(ms(700), |queue, id| {
            if let Some(effect) = picker.on_timer(id, queue, &clock) {
                effects.extend(effect.into_vec());
            }
        });
        picker.release(&mut queue);

        assert!(effects.is_empty());
        assert_eq!(picker.calendar().unwrap().cursor(), DisplayCursor::new(11, 2023));
        assert_eq!(picker.value(), Some("2024-02-15"));
    }
}
