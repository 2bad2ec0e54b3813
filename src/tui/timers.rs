use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::trace;

/// Shortest interval a repeating timer may use
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Handle to a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Timer facility used by the calendar components
///
/// Timers carry no callback. When one fires, the event loop hands its
/// `TimerId` back to whichever component scheduled it, so every handler runs
/// on the loop with ordinary `&mut` access to its own state.
pub trait Scheduler {
    /// Current time as seen by this scheduler
    fn now(&self) -> Instant;

    /// Fire once after `delay`
    fn set_timeout(&mut self, delay: Duration) -> TimerId;

    /// Fire every `period`, first after one period has elapsed
    fn set_interval(&mut self, period: Duration) -> TimerId;

    /// Cancel a timer; unknown or already-fired ids are ignored
    fn clear(&mut self, id: TimerId);
}

#[derive(Debug, Clone)]
struct Timer {
    deadline: Instant,
    period: Option<Duration>,
}

/// Virtual-time timer queue
///
/// Time only moves when the owner advances it. The runtime feeds it real
/// `Instant`s; tests feed synthetic ones, so timing behaviour can be checked
/// without sleeping.
#[derive(Debug)]
pub struct TimerQueue {
    now: Instant,
    next_id: u64,
    timers: BTreeMap<TimerId, Timer>,
}

impl TimerQueue {
    pub fn new(now: Instant) -> Self {
        Self {
            now,
            next_id: 0,
            timers: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Earliest pending deadline, used by the event loop to decide how long to sleep
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.values().map(|t| t.deadline).min()
    }

    /// Pop the next timer due at or before `until`
    ///
    /// Time advances to the popped timer's deadline, so a handler that
    /// schedules new timers schedules them relative to the moment its own
    /// timer fired. Ties fire in creation order. Repeating timers are
    /// re-armed for their next period.
    pub fn pop_due(&mut self, until: Instant) -> Option<TimerId> {
        let (id, deadline) = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.deadline <= until)
            .min_by_key(|(id, timer)| (timer.deadline, **id))
            .map(|(id, timer)| (*id, timer.deadline))?;

        if deadline > self.now {
            self.now = deadline;
        }

        let rearmed = match self.timers.get_mut(&id) {
            Some(timer) => match timer.period {
                Some(period) => {
                    timer.deadline = deadline + period;
                    true
                }
                None => false,
            },
            None => false,
        };
        if !rearmed {
            self.timers.remove(&id);
        }

        trace!("TIMER: {:?} fired", id);
        Some(id)
    }

    /// Move time forward to `until` once nothing more is due
    pub fn settle(&mut self, until: Instant) {
        if until > self.now {
            self.now = until;
        }
    }

    /// Fire every timer due up to `until`, then settle there
    ///
    /// The handler receives the queue so it can schedule or clear timers
    /// between firings.
    pub fn advance_to<F>(&mut self, until: Instant, mut handler: F) -> usize
    where
        F: FnMut(&mut Self, TimerId),
    {
        let mut fired = 0;
        while let Some(id) = self.pop_due(until) {
            handler(self, id);
            fired += 1;
        }
        self.settle(until);
        fired
    }

    /// Convenience for [`advance_to`](Self::advance_to) relative to the current time
    pub fn advance<F>(&mut self, by: Duration, handler: F) -> usize
    where
        F: FnMut(&mut Self, TimerId),
    {
        let until = self.now + by;
        self.advance_to(until, handler)
    }

    fn insert(&mut self, delay: Duration, period: Option<Duration>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.insert(
            id,
            Timer {
                deadline: self.now + delay,
                period,
            },
        );
        id
    }
}

impl Scheduler for TimerQueue {
    fn now(&self) -> Instant {
        self.now
    }

    fn set_timeout(&mut self, delay: Duration) -> TimerId {
        let id = self.insert(delay, None);
        trace!("TIMER: {:?} timeout in {:?}", id, delay);
        id
    }

    fn set_interval(&mut self, period: Duration) -> TimerId {
        let period = period.max(MIN_INTERVAL);
        let id = self.insert(period, Some(period));
        trace!("TIMER: {:?} interval every {:?}", id, period);
        id
    }

    fn clear(&mut self, id: TimerId) {
        if self.timers.remove(&id).is_some() {
            trace!("TIMER: {:?} cleared", id);
        }
    }
}
