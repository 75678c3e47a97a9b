//! Render error types.

use thiserror::Error;

/// Errors raised by a math engine.
///
/// Page rendering never surfaces these: the tolerant renderer turns them
/// into fallback markup. They are returned by strict checks.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The formula could not be converted
    #[error("cannot render formula '{formula}': {message}")]
    Math {
        /// Formula source
        formula: String,
        /// Message from the engine
        message: String,
    },

    /// The engine could not be configured
    #[error("math engine configuration failed: {0}")]
    Engine(String),
}
