use std::time::Duration;
use tracing::debug;

use super::timers::{Scheduler, TimerId};

/// Delay and repeat rate for press-and-hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressTiming {
    /// Wait after the immediate invocation before repeating starts
    pub initial_delay: Duration,
    /// Gap between repeats once started
    pub repeat_interval: Duration,
}

impl Default for PressTiming {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(500),
            repeat_interval: Duration::from_millis(100),
        }
    }
}

/// One pointer-down-to-release gesture
#[derive(Debug)]
struct PressSession<A> {
    action: A,
    initial_timer: Option<TimerId>,
    repeat_timer: Option<TimerId>,
}

/// Turns a single press into an immediate action followed by repeats
///
/// `start` invokes the action right away and arms the initial-delay timer.
/// When that fires, a repeating timer takes over and invokes the action on
/// every tick until `stop`. At most one session exists; starting a new one
/// cancels the old one first.
///
/// The owner must call `stop` on release and on teardown. Dropping the
/// controller with a live session leaves its timers in the scheduler.
#[derive(Debug)]
pub struct PressAndHold<A> {
    timing: PressTiming,
    session: Option<PressSession<A>>,
}

impl<A> Default for PressAndHold<A> {
    fn default() -> Self {
        Self::new(PressTiming::default())
    }
}

impl<A> PressAndHold<A> {
    pub fn new(timing: PressTiming) -> Self {
        Self {
            timing,
            session: None,
        }
    }

    /// Begin a press session
    ///
    /// `invoke` is called once, synchronously, before any timer is armed.
    pub fn start<S, F>(&mut self, action: A, scheduler: &mut S, mut invoke: F)
    where
        S: Scheduler + ?Sized,
        F: FnMut(&A),
    {
        self.stop(scheduler);

        invoke(&action);
        let initial_timer = scheduler.set_timeout(self.timing.initial_delay);
        debug!("PRESS: session started, repeat in {:?}", self.timing.initial_delay);

        self.session = Some(PressSession {
            action,
            initial_timer: Some(initial_timer),
            repeat_timer: None,
        });
    }

    /// Handle a fired timer
    ///
    /// Returns false if the timer does not belong to the current session, so
    /// the caller can offer it to someone else.
    pub fn on_timer<S, F>(&mut self, id: TimerId, scheduler: &mut S, mut invoke: F) -> bool
    where
        S: Scheduler + ?Sized,
        F: FnMut(&A),
    {
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        if session.initial_timer == Some(id) {
            session.initial_timer = None;
            session.repeat_timer = Some(scheduler.set_interval(self.timing.repeat_interval));
            debug!("PRESS: initial delay elapsed, repeating every {:?}", self.timing.repeat_interval);
            true
        } else if session.repeat_timer == Some(id) {
            invoke(&session.action);
            true
        } else {
            false
        }
    }

    /// End the current session, cancelling both timers
    ///
    /// Safe to call with no session.
    pub fn stop<S>(&mut self, scheduler: &mut S)
    where
        S: Scheduler + ?Sized,
    {
        if let Some(session) = self.session.take() {
            if let Some(id) = session.initial_timer {
                scheduler.clear(id);
            }
            if let Some(id) = session.repeat_timer {
                scheduler.clear(id);
            }
            debug!("PRESS: session stopped");
        }
    }
}
