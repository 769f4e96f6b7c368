//! Almanac calendar engine - shared configuration, domain types, and errors.

pub mod config;
pub mod error;
pub mod types;
