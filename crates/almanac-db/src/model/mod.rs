pub mod event;
pub mod occurrence;
