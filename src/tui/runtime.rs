use ratatui::layout::Rect;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, info, trace};

use super::clock::Clock;
use super::component::Effect;
use super::components::DatePickerView;
use super::keys::UiEvent;
use super::layout::{CalendarHit, PickerHit, PickerLayout};
use super::timers::TimerQueue;

/// Picker runtime - owns the view, its timers and the event routing
///
/// The Runtime is responsible for:
/// - Turning pointer and key gestures into picker operations
/// - Firing due timers and routing them back to their owners
/// - Delivering value changes to subscribers
/// - Tearing everything down on exit
pub struct Runtime {
    picker: DatePickerView,
    timers: TimerQueue,
    clock: Box<dyn Clock>,
    /// Last drawn area, used for hit-testing
    area: Rect,
    /// Arrow held down by the pointer
    pressed: Option<CalendarHit>,
    quit: bool,
    change_tx: Option<mpsc::UnboundedSender<Option<String>>>,
}

impl Runtime {
    pub fn new(picker: DatePickerView, clock: Box<dyn Clock>, now: Instant) -> Self {
        Self {
            picker,
            timers: TimerQueue::new(now),
            clock,
            area: Rect::default(),
            pressed: None,
            quit: false,
            change_tx: None,
        }
    }

    /// Receive every value change from now on
    ///
    /// A later call replaces the previous subscriber.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<Option<String>> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.change_tx = Some(tx);
        rx
    }

    pub fn picker(&self) -> &DatePickerView {
        &self.picker
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    pub fn pressed(&self) -> Option<CalendarHit> {
        self.pressed
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    pub fn layout(&self) -> PickerLayout {
        PickerLayout::new(self.area, self.picker.is_open())
    }

    /// When the event loop must wake up next, if any timer is pending
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Fire every timer due by `now`
    pub fn fire_due_timers(&mut self, now: Instant) -> usize {
        let picker = &mut self.picker;
        let clock = self.clock.as_ref();
        let mut effects = Effect::None;

        let fired = self.timers.advance_to(now, |timers, id| {
            match picker.on_timer(id, timers, clock) {
                Some(effect) => effects = std::mem::take(&mut effects).and(effect),
                None => trace!("RUNTIME: {:?} has no owner", id),
            }
        });

        self.emit(effects);
        fired
    }

    /// Apply an externally controlled value
    pub fn set_value(&mut self, value: Option<&str>) {
        let effect = self.picker.set_value(value);
        self.emit(effect);
    }

    /// Handle one gesture at time `now`
    pub fn handle_event(&mut self, event: UiEvent, now: Instant) {
        self.fire_due_timers(now);
        trace!("RUNTIME: {:?}", event);

        let effect = match event {
            UiEvent::PointerDown { column, row, shift } => self.pointer_down(column, row, shift),
            UiEvent::PointerDrag { column, row } => {
                self.pointer_drag(column, row);
                Effect::None
            }
            UiEvent::PointerUp => {
                self.release();
                Effect::None
            }
            UiEvent::ToggleDropdown => {
                self.toggle();
                Effect::None
            }
            UiEvent::Clear => self.picker.clear(),
            UiEvent::Quit => {
                debug!("RUNTIME: quit requested");
                self.quit = true;
                Effect::None
            }
            UiEvent::Resize => Effect::None,
        };

        self.emit(effect);
    }

    fn pointer_down(&mut self, column: u16, row: u16, shift: bool) -> Effect {
        match self.layout().hit(column, row) {
            Some(PickerHit::Input) => {
                self.toggle();
                Effect::None
            }
            Some(PickerHit::Calendar(CalendarHit::Previous)) => {
                self.pressed = Some(CalendarHit::Previous);
                self.picker.press_previous(shift, &mut self.timers)
            }
            Some(PickerHit::Calendar(CalendarHit::Next)) => {
                self.pressed = Some(CalendarHit::Next);
                self.picker.press_next(shift, &mut self.timers)
            }
            Some(PickerHit::Calendar(CalendarHit::Cell(index))) => {
                let effect = self.picker.select_cell(index, &mut self.timers);
                self.sync_pressed();
                effect
            }
            None => {
                // Clicking outside dismisses the dropdown
                if self.picker.is_open() && !self.layout().contains(column, row) {
                    self.close();
                }
                Effect::None
            }
        }
    }

    /// Leaving the held arrow ends the press
    fn pointer_drag(&mut self, column: u16, row: u16) {
        if let Some(arrow) = self.pressed {
            if self.layout().hit(column, row) != Some(PickerHit::Calendar(arrow)) {
                debug!("RUNTIME: pointer left {:?}", arrow);
                self.release();
            }
        }
    }

    fn release(&mut self) {
        if self.pressed.take().is_some() {
            self.picker.release(&mut self.timers);
        }
    }

    fn toggle(&mut self) {
        if self.picker.is_open() {
            self.close();
        } else {
            self.picker.open(self.clock.as_ref(), &mut self.timers);
        }
    }

    fn close(&mut self) {
        self.pressed = None;
        self.picker.close(&mut self.timers);
    }

    fn sync_pressed(&mut self) {
        if !self.picker.is_open() {
            self.pressed = None;
        }
    }

    fn emit(&mut self, effect: Effect) {
        for effect in effect.into_vec() {
            match effect {
                Effect::ValueChanged(value) => {
                    info!("RUNTIME: value changed to {:?}", value);
                    let delivered = self
                        .change_tx
                        .as_ref()
                        .map_or(true, |tx| tx.send(value).is_ok());
                    if !delivered {
                        debug!("RUNTIME: change subscriber dropped");
                        self.change_tx = None;
                    }
                }
                other => trace!("RUNTIME: ignoring {:?}", other),
            }
        }
    }

    /// Close the dropdown and cancel every pending timer
    pub fn shutdown(&mut self) {
        self.pressed = None;
        self.picker.teardown(&mut self.timers);
        debug!("RUNTIME: shut down with {} timers pending", self.timers.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{CalendarLabels, DisplayCursor};
    use crate::tui::press::PressTiming;
    use crate::tui::testing::{fixture_clock, ms};

    /// Open-calendar coordinates with the picker drawn at the origin
    const INPUT: (u16, u16) = (5, 2);
    const PREVIOUS: (u16, u16) = (2, 5);
    const NEXT: (u16, u16) = (27, 5);
    const TITLE: (u16, u16) = (14, 5);

    /// Cell `index` of the open calendar
    fn cell(index: u16) -> (u16, u16) {
        (2 + (index % 7) * 4, 7 + index / 7)
    }

    fn runtime(value: Option<&str>) -> (Runtime, Instant) {
        let start = Instant::now();
        let picker = DatePickerView::new(None, value, CalendarLabels::default(), PressTiming::default());
        let mut runtime = Runtime::new(picker, Box::new(fixture_clock()), start);
        runtime.set_area(Rect::new(0, 0, 80, 24));
        (runtime, start)
    }

    fn down(at: (u16, u16)) -> UiEvent {
        UiEvent::PointerDown {
            column: at.0,
            row: at.1,
            shift: false,
        }
    }

    fn cursor(runtime: &Runtime) -> DisplayCursor {
        runtime.picker().calendar().unwrap().cursor()
    }

    #[test]
    fn test_click_input_toggles_dropdown() {
        let (mut runtime, start) = runtime(None);

        runtime.handle_event(down(INPUT), start);
        assert!(runtime.picker().is_open());

        runtime.handle_event(down(INPUT), start);
        assert!(!runtime.picker().is_open());
        assert!(runtime.timers().is_empty());
    }

    #[test]
    fn test_click_outside_closes_dropdown() {
        let (mut runtime, start) = runtime(None);
        runtime.handle_event(UiEvent::ToggleDropdown, start);

        runtime.handle_event(down((60, 20)), start);

        assert!(!runtime.picker().is_open());
    }

    #[test]
    fn test_click_inside_calendar_keeps_dropdown_open() {
        let (mut runtime, start) = runtime(None);
        runtime.handle_event(UiEvent::ToggleDropdown, start);

        runtime.handle_event(down(TITLE), start);

        assert!(runtime.picker().is_open());
    }

    #[test]
    fn test_click_cell_selects_and_notifies() {
        let (mut runtime, start) = runtime(None);
        let mut changes = runtime.subscribe();
        runtime.handle_event(UiEvent::ToggleDropdown, start);

        // February 2024: cell 18 is the 15th
        runtime.handle_event(down(cell(18)), start);

        assert_eq!(runtime.picker().value(), Some("2024-02-15"));
        assert!(!runtime.picker().is_open());
        assert_eq!(changes.try_recv().unwrap(), Some("2024-02-15".to_string()));
        assert!(changes.try_recv().is_err());
    }

    #[test]
    fn test_hold_next_repeats_until_release() {
        let (mut runtime, start) = runtime(None);
        runtime.handle_event(UiEvent::ToggleDropdown, start);

        runtime.handle_event(down(NEXT), start);
        assert_eq!(runtime.pressed(), Some(CalendarHit::Next));
        assert_eq!(cursor(&runtime), DisplayCursor::new(3, 2024));

        runtime.fire_due_timers(start + ms(800));
        assert_eq!(cursor(&runtime), DisplayCursor::new(6, 2024));

        runtime.handle_event(UiEvent::PointerUp, start + ms(850));
        runtime.fire_due_timers(start + ms(2000));
        assert_eq!(cursor(&runtime), DisplayCursor::new(6, 2024));
        assert_eq!(runtime.pressed(), None);
    }

    #[test]
    fn test_release_before_delay_moves_once() {
        let (mut runtime, start) = runtime(None);
        runtime.handle_event(UiEvent::ToggleDropdown, start);

        runtime.handle_event(down(PREVIOUS), start);
        runtime.handle_event(UiEvent::PointerUp, start + ms(300));
        runtime.fire_due_timers(start + ms(5000));

        assert_eq!(cursor(&runtime), DisplayCursor::new(1, 2024));
    }

    #[test]
    fn test_dragging_off_arrow_stops_repeat() {
        let (mut runtime, start) = runtime(None);
        runtime.handle_event(UiEvent::ToggleDropdown, start);

        runtime.handle_event(down(NEXT), start);
        runtime.handle_event(
            UiEvent::PointerDrag {
                column: NEXT.0,
                row: NEXT.1,
            },
            start + ms(100),
        );
        assert_eq!(runtime.pressed(), Some(CalendarHit::Next));

        runtime.handle_event(
            UiEvent::PointerDrag {
                column: TITLE.0,
                row: TITLE.1,
            },
            start + ms(650),
        );
        runtime.fire_due_timers(start + ms(2000));

        // Immediate step plus the repeat at 600ms
        assert_eq!(cursor(&runtime), DisplayCursor::new(4, 2024));
        assert_eq!(runtime.pressed(), None);
    }

    #[test]
    fn test_shift_click_steps_year() {
        let (mut runtime, start) = runtime(Some("2024-02-15"));
        runtime.handle_event(UiEvent::ToggleDropdown, start);

        runtime.handle_event(
            UiEvent::PointerDown {
                column: PREVIOUS.0,
                row: PREVIOUS.1,
                shift: true,
            },
            start,
        );
        runtime.handle_event(UiEvent::PointerUp, start);

        assert_eq!(cursor(&runtime), DisplayCursor::new(2, 2023));
        assert_eq!(runtime.picker().value(), Some("2024-02-15"));
    }

    #[test]
    fn test_clear_notifies() {
        let (mut runtime, start) = runtime(Some("2024-02-15"));
        let mut changes = runtime.subscribe();

        runtime.handle_event(UiEvent::Clear, start);
        runtime.handle_event(UiEvent::Clear, start);

        assert_eq!(runtime.picker().value(), None);
        assert_eq!(changes.try_recv().unwrap(), None);
        assert!(changes.try_recv().is_err());
    }

    #[test]
    fn test_set_value_notifies_once() {
        let (mut runtime, _) = runtime(None);
        let mut changes = runtime.subscribe();

        runtime.set_value(Some("2024-03-01"));
        runtime.set_value(Some("2024/03/01"));

        assert_eq!(changes.try_recv().unwrap(), Some("2024-03-01".to_string()));
        assert!(changes.try_recv().is_err());
    }

    #[test]
    fn test_quit_and_shutdown() {
        let (mut runtime, start) = runtime(None);
        runtime.handle_event(UiEvent::ToggleDropdown, start);
        runtime.handle_event(down(NEXT), start);

        runtime.handle_event(UiEvent::Quit, start + ms(10));
        assert!(runtime.should_quit());

        runtime.shutdown();
        assert!(runtime.timers().is_empty());
        assert!(!runtime.picker().is_open());
        assert_eq!(runtime.next_deadline(), None);
    }

    #[tokio::test]
    async fn test_subscriber_receives_changes_across_tasks() {
        let (mut runtime, start) = runtime(None);
        let mut changes = runtime.subscribe();

        let listener = tokio::spawn(async move { changes.recv().await });

        runtime.handle_event(UiEvent::ToggleDropdown, start);
        runtime.handle_event(down(cell(0)), start);

        let received = listener.await.unwrap();
        assert_eq!(received, Some(Some("2024-01-28".to_string())));
    }
}
