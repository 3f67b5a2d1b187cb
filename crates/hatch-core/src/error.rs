//! Unified error handling for Hatch Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Hatch Core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HatchError {
    /// Errors from the domain layer (descriptor, path and name rules).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (scan, staging, commit).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// A scaffold failed and removing its staging directory failed too.
    ///
    /// Displays and categorizes as the original error.
    #[error("{original} (cleanup also failed: {cleanup})")]
    CleanupAlsoFailed {
        original: Box<HatchError>,
        cleanup: ApplicationError,
    },

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl HatchError {
    /// The error that caused the failure, looking through cleanup failures.
    pub fn primary(&self) -> &HatchError {
        match self {
            Self::CleanupAlsoFailed { original, .. } => original.primary(),
            other => other,
        }
    }

    /// The cleanup failure attached to this error, if any.
    pub fn cleanup_failure(&self) -> Option<&ApplicationError> {
        match self {
            Self::CleanupAlsoFailed { cleanup, .. } => Some(cleanup),
            _ => None,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::CleanupAlsoFailed { original, cleanup } => {
                let mut out = original.suggestions();
                out.extend(cleanup.suggestions());
                out
            }
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in Hatch".into(),
                "Please report it together with the output of -vv".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Conflict => ErrorCategory::Conflict,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::CleanupAlsoFailed { original, .. } => original.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Whether this failure came from a concurrent writer winning the race
    /// for the same project root.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self.primary(),
            Self::Application(
                ApplicationError::ProjectExists { .. } | ApplicationError::CommitConflict { .. }
            )
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Conflict,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type HatchResult<T> = Result<T, HatchError>;
