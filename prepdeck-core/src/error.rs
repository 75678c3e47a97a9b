//! Core error types for `prepdeck`
//!
//! Content loading and validation error types shared across the workspace.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

// ============================================================================
// Content Errors
// ============================================================================

/// Lesson and site configuration loading errors.
#[derive(Debug, Error)]
pub enum ContentError {
    /// YAML parsing failed
    #[error("parse error in {path}{}: {message}", line.map_or_else(String::new, |l| format!(" (line {l})")))]
    ParseError {
        /// Path to the content file
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Content file could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path to the content file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Referenced content file or directory not found
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Field has an invalid value
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The actual value provided
        value: String,
        /// Description of what was expected
        expected: String,
    },

    /// Two lessons resolve to the same id
    #[error("duplicate lesson id '{id}' in {path}, first seen in {first}")]
    DuplicateId {
        /// The clashing lesson id
        id: String,
        /// File that reused the id
        path: PathBuf,
        /// File that claimed the id first
        first: PathBuf,
    },

    /// One or more lessons failed validation.
    #[error("{count} lesson(s) failed validation")]
    ValidationFailed {
        /// Number of lessons that failed validation.
        count: usize,
    },
}

// ============================================================================
// Validation Types
// ============================================================================

/// A single validation issue found while checking a lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Path to the problematic field (e.g., "blocks[2].options")
    pub path: String,
    /// Description of the validation issue
    pub message: String,
    /// Severity level of the issue
    pub severity: Severity,
}

impl ValidationIssue {
    /// Creates an error-level issue.
    #[must_use]
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            severity: Severity::Error,
        }
    }

    /// Creates a warning-level issue.
    #[must_use]
    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            severity: Severity::Warning,
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {} at {}", prefix, self.message, self.path)
    }
}

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - the lesson is not fit to publish
    Error,
    /// Warning - suspicious content that still renders
    Warning,
}
