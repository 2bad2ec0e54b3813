use thiserror::Error;

/// Errors raised by the calendar core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Expected a valid date but none was given")]
    InvalidDate,

    #[error("Expected {expected} {kind} labels, found {found}")]
    InvalidLabels {
        kind: &'static str,
        expected: usize,
        found: usize,
    },
}

/// Result type for calendar operations
pub type CalendarResult<T> = Result<T, CalendarError>;
