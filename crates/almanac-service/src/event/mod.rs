//! Event creation, lookup, and the month-view query flow.

pub mod service;

pub use service::{CreateEvent, EventService};
