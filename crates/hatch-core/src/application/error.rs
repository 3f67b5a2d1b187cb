//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not descriptor
//! rules. Rule violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while scanning or scaffolding.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// The repository root is missing or is not a directory.
    #[error("Template root not found: {path}")]
    RootNotFound { path: PathBuf },

    /// No catalog entry has the requested id.
    #[error("Template not found: {id}")]
    TemplateNotFound { id: String },

    /// A filesystem port call failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The project root already exists.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// Building the project under the staging directory failed.
    #[error("Staging failed at {path}: {reason}")]
    StagingFailed { path: PathBuf, reason: String },

    /// The final rename of the staged project did not go through.
    #[error("Could not commit project to {path}: {reason}")]
    CommitConflict { path: PathBuf, reason: String },

    /// Removing the staging directory failed (best-effort cleanup).
    #[error("Cleanup failed for {path}: {reason}")]
    CleanupFailed { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::RootNotFound { path } => vec![
                format!("No template directory at {}", path.display()),
                "Pass --templates <DIR> or set templates.root in the config".into(),
            ],
            Self::TemplateNotFound { id } => vec![
                format!("No template with id '{}'", id),
                "Try: hatch list to see available templates".into(),
            ],
            Self::FilesystemError { path, .. } | Self::StagingFailed { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Check available disk space".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project name or location".into(),
            ],
            Self::CommitConflict { path, .. } => vec![
                format!("Something else created {} at the same time", path.display()),
                "Nothing was written; retry with a different name".into(),
            ],
            Self::CleanupFailed { path, .. } => vec![
                format!("Remove the leftover staging directory: {}", path.display()),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RootNotFound { .. } | Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::ProjectExists { .. } | Self::CommitConflict { .. } => ErrorCategory::Conflict,
            Self::FilesystemError { .. }
            | Self::StagingFailed { .. }
            | Self::CleanupFailed { .. } => ErrorCategory::Internal,
        }
    }
}
