use chrono::{Local, NaiveDate, NaiveDateTime};
use std::cell::Cell;
use std::time::Duration;

/// Fallback wait when the next midnight cannot be represented
const ONE_DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Source of the local wall-clock time
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Reads `chrono::Local`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Settable clock for tests and replays
#[derive(Debug)]
pub struct FixedClock {
    now: Cell<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now: Cell::new(now) }
    }

    /// Clock at midnight starting `date`
    pub fn at_date(date: NaiveDate) -> Self {
        Self::new(date.and_time(chrono::NaiveTime::MIN))
    }

    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(now);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}

/// Time left until the next local midnight
pub fn until_next_midnight(now: NaiveDateTime) -> Duration {
    now.date()
        .succ_opt()
        .map(|tomorrow| tomorrow.and_time(chrono::NaiveTime::MIN) - now)
        .and_then(|remaining| remaining.to_std().ok())
        .unwrap_or(ONE_DAY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_until_next_midnight() {
        assert_eq!(
            until_next_midnight(at(2024, 2, 15, 23, 59, 0)),
            Duration::from_secs(60)
        );
        assert_eq!(
            until_next_midnight(at(2024, 2, 15, 12, 0, 0)),
            Duration::from_secs(12 * 60 * 60)
        );
        assert_eq!(until_next_midnight(at(2024, 2, 15, 0, 0, 0)), ONE_DAY);
    }

    #[test]
    fn test_until_next_midnight_at_last_representable_day() {
        let now = NaiveDate::MAX.and_hms_opt(12, 0, 0).unwrap();
        assert_eq!(until_next_midnight(now), ONE_DAY);
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::new(at(2024, 2, 15, 9, 30, 0));
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 2, 15).unwrap());

        clock.set(at(2024, 2, 16, 0, 0, 1));
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 2, 16).unwrap());
    }
}
