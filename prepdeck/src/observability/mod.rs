//! Observability
//!
//! Structured logging for `prepdeck` runs.

pub mod logging;

pub use logging::LogSettings;
