/// Terminal event to UI event mapping
///
/// This module converts crossterm key and mouse events into the small set of
/// gestures the date picker understands.
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use tracing::trace;

/// Gesture understood by the picker runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// Left button pressed; shift switches arrows to year steps
    PointerDown { column: u16, row: u16, shift: bool },
    /// Pointer moved with the button held
    PointerDrag { column: u16, row: u16 },
    PointerUp,
    ToggleDropdown,
    Clear,
    Quit,
    Resize,
}

fn handle_key(key: KeyEvent) -> Option<UiEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(UiEvent::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(UiEvent::Quit),
        KeyCode::Enter | KeyCode::Char(' ') => Some(UiEvent::ToggleDropdown),
        KeyCode::Backspace | KeyCode::Delete => Some(UiEvent::Clear),
        _ => None,
    }
}

fn handle_mouse(mouse: MouseEvent) -> Option<UiEvent> {
    let MouseEvent { kind, column, row, modifiers } = mouse;
    match kind {
        MouseEventKind::Down(MouseButton::Left) => Some(UiEvent::PointerDown {
            column,
            row,
            shift: modifiers.contains(KeyModifiers::SHIFT),
        }),
        MouseEventKind::Drag(MouseButton::Left) => Some(UiEvent::PointerDrag { column, row }),
        MouseEventKind::Up(MouseButton::Left) => Some(UiEvent::PointerUp),
        _ => None,
    }
}

/// Translate a terminal event, dropping the ones the picker ignores
pub fn translate(event: &Event) -> Option<UiEvent> {
    let translated = match event {
        Event::Key(key) => handle_key(*key),
        Event::Mouse(mouse) => handle_mouse(*mouse),
        Event::Resize(_, _) => Some(UiEvent::Resize),
        _ => None,
    };
    trace!("KEY: {:?} -> {:?}", event, translated);
    translated
}
