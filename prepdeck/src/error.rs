//! Error types for `prepdeck`
//!
//! Aggregates the content and render errors of the library crates and maps
//! every failure to a process exit code.

use std::path::PathBuf;

use thiserror::Error;

pub use prepdeck_core::error::ContentError;
pub use prepdeck_render::RenderError;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `prepdeck` CLI operations.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Content or configuration error (invalid YAML, validation failure)
    pub const CONTENT_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Math rendering error (strict formula check)
    pub const RENDER_ERROR: i32 = 4;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `prepdeck` operations.
#[derive(Debug, Error)]
pub enum PrepdeckError {
    /// Lesson or site configuration error
    #[error(transparent)]
    Content(#[from] ContentError),

    /// Math rendering error
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Output file could not be written
    #[error("failed to write {path}: {source}")]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid combination of arguments
    #[error("{0}")]
    Usage(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PrepdeckError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Content(ContentError::Read { .. } | ContentError::MissingFile { .. })
            | Self::Write { .. }
            | Self::Io(_) => ExitCode::IO_ERROR,
            Self::Content(_) => ExitCode::CONTENT_ERROR,
            Self::Render(_) => ExitCode::RENDER_ERROR,
            Self::Usage(_) => ExitCode::USAGE_ERROR,
            Self::Json(_) => ExitCode::ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let parse = PrepdeckError::Content(ContentError::ParseError {
            path: PathBuf::from("a.yaml"),
            line: Some(3),
            message: "bad".to_string(),
        });
        assert_eq!(parse.exit_code(), ExitCode::CONTENT_ERROR);

        let failed = PrepdeckError::Content(ContentError::ValidationFailed { count: 2 });
        assert_eq!(failed.exit_code(), ExitCode::CONTENT_ERROR);

        let missing = PrepdeckError::Content(ContentError::MissingFile {
            path: PathBuf::from("content"),
        });
        assert_eq!(missing.exit_code(), ExitCode::IO_ERROR);

        let render = PrepdeckError::Render(RenderError::Math {
            formula: "\\frac{1}{2".to_string(),
            message: "Expected '}'".to_string(),
        });
        assert_eq!(render.exit_code(), ExitCode::RENDER_ERROR);

        let usage = PrepdeckError::Usage("nope".to_string());
        assert_eq!(usage.exit_code(), ExitCode::USAGE_ERROR);

        let io = PrepdeckError::Io(std::io::Error::other("disk"));
        assert_eq!(io.exit_code(), ExitCode::IO_ERROR);
    }

    #[test]
    fn test_transparent_display() {
        let err = PrepdeckError::Content(ContentError::ValidationFailed { count: 1 });
        assert_eq!(err.to_string(), "1 lesson(s) failed validation");
    }

    #[test]
    fn test_write_display() {
        let err = PrepdeckError::Write {
            path: PathBuf::from("site/index.html"),
            source: std::io::Error::other("read-only"),
        };
        assert_eq!(err.to_string(), "failed to write site/index.html: read-only");
    }
}
