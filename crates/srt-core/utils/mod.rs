//! Utility types shared across the time and parser modules

pub mod errors;

pub use errors::{CoreError, Result, TimeField};
