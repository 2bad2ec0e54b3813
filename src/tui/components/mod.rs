pub mod calendar_view;
pub mod date_picker;

pub use calendar_view::{CalendarView, CellMarker};
pub use date_picker::{DatePickerView, DEFAULT_LABEL, PLACEHOLDER};
