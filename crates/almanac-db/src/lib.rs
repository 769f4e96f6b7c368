//! Almanac calendar engine - event/occurrence models and the store contract.

pub mod error;
pub mod model;
pub mod store;
