use std::io;
use thiserror::Error;

/// TUI-specific errors
#[derive(Error, Debug)]
pub enum TuiError {
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Terminal event reader stopped unexpectedly")]
    EventStreamClosed,

    #[error("Terminal is too small: need {needed_width}x{needed_height}, have {width}x{height}")]
    TerminalTooSmall {
        needed_width: u16,
        needed_height: u16,
        width: u16,
        height: u16,
    },
}

/// Result type for TUI operations
pub type TuiResult<T> = Result<T, TuiError>;
