// Utility functions
pub mod coerce;
pub mod error;
pub mod json;

pub use error::*;
