// Module declarations
pub mod widgets;
pub mod components;

pub mod action;
pub mod clock;
pub mod component;
pub mod error;
pub mod keys;
pub mod layout;
pub mod press;
pub mod reducer;
pub mod runtime;
pub mod state;
pub mod timers;

#[cfg(test)]
pub mod testing;

pub use action::Action;
pub use clock::{Clock, FixedClock, SystemClock};
pub use component::Effect;
pub use components::{CalendarView, DatePickerView};
pub use error::{TuiError, TuiResult};
pub use keys::{translate, UiEvent};
pub use press::{PressAndHold, PressTiming};
pub use reducer::reduce;
pub use runtime::Runtime;
pub use state::SelectionState;
pub use timers::{Scheduler, TimerId, TimerQueue};

use std::io;
use std::thread;
use std::time::{Duration, Instant};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use crate::config::Config;
use layout::{CALENDAR_HEIGHT, INPUT_HEIGHT, LABEL_HEIGHT, PICKER_WIDTH};
use widgets::{DatePickerWidget, RenderableWidget};

/// How often the reader thread checks whether the UI has gone away
const POLL_INTERVAL: Duration = Duration::from_millis(50);

type CrosstermTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Forward terminal events from a blocking reader thread
///
/// The thread exits once the receiving side is dropped.
fn spawn_event_reader(tx: mpsc::UnboundedSender<Event>) {
    thread::spawn(move || {
        while !tx.is_closed() {
            match event::poll(POLL_INTERVAL) {
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        if tx.send(ev).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("EVENTS: read failed: {}", e);
                        break;
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    warn!("EVENTS: poll failed: {}", e);
                    break;
                }
            }
        }
        debug!("EVENTS: reader stopped");
    });
}

/// Sleep until the next timer deadline, or forever when none is pending
async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}

fn check_terminal_size() -> TuiResult<()> {
    let (width, height) = terminal::size()?;
    let needed_height = LABEL_HEIGHT + INPUT_HEIGHT + CALENDAR_HEIGHT;
    if width < PICKER_WIDTH || height < needed_height {
        return Err(TuiError::TerminalTooSmall {
            needed_width: PICKER_WIDTH,
            needed_height,
            width,
            height,
        });
    }
    Ok(())
}

/// Draw and dispatch until the user quits
async fn event_loop(
    terminal: &mut CrosstermTerminal,
    runtime: &mut Runtime,
    config: &Config,
    events: &mut mpsc::UnboundedReceiver<Event>,
) -> TuiResult<()> {
    loop {
        terminal.draw(|f| {
            let area = f.area();
            runtime.set_area(area);
            DatePickerWidget::new(runtime.picker(), runtime.pressed()).render(area, f.buffer_mut(), &config.theme);
        })?;

        if runtime.should_quit() {
            return Ok(());
        }

        tokio::select! {
            event = events.recv() => {
                let event = event.ok_or(TuiError::EventStreamClosed)?;
                if let Some(ui_event) = translate(&event) {
                    runtime.handle_event(ui_event, Instant::now());
                }
            }
            _ = sleep_until_deadline(runtime.next_deadline()) => {
                runtime.fire_due_timers(Instant::now());
            }
        }
    }
}

/// Run the interactive picker
///
/// Returns the ISO value held when the user quits.
pub async fn run(
    config: &Config,
    value: Option<&str>,
    label: Option<String>,
) -> TuiResult<Option<String>> {
    check_terminal_size()?;

    let picker = DatePickerView::new(
        label,
        value,
        config.labels.calendar_labels(),
        config.press.timing(),
    );
    let mut runtime = Runtime::new(picker, Box::new(SystemClock), Instant::now());
    let mut changes = runtime.subscribe();
    tokio::spawn(async move {
        while let Some(value) = changes.recv().await {
            info!("PICKER: onChange({:?})", value);
        }
    });

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (tx, mut events) = mpsc::unbounded_channel();
    spawn_event_reader(tx);

    let result = event_loop(&mut terminal, &mut runtime, config, &mut events).await;
    runtime.shutdown();
    drop(events);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result?;
    Ok(runtime.picker().value().map(String::from))
}
