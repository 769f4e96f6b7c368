//! Almanac calendar engine - month-grid windows, recurrence expansion, and
//! the event service orchestrating both.

pub mod calendar;
pub mod clock;
pub mod error;
pub mod event;
