// ============================================================================
// domain/error.rs - descriptor, path and name validation failures
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (scan failures are stored in the catalog and handed out)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Descriptor errors (collected by the repository scan, never fatal to it)
    // ========================================================================
    #[error("Malformed template descriptor: {reason}")]
    TemplateParse { reason: String },

    #[error("Template descriptor could not be read: {reason}")]
    TemplateUnreadable { reason: String },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Duplicate path in template: {path}")]
    DuplicatePath { path: String },

    #[error("Template id '{id}' is already provided by {}", first.display())]
    DuplicateTemplateId { id: String, first: PathBuf },

    // ========================================================================
    // Path and name errors
    // ========================================================================
    #[error("Path '{path}' escapes its root: {reason}")]
    PathTraversalRejected { path: String, reason: &'static str },

    #[error("Invalid project name '{name}': {reason}")]
    InvalidName { name: String, reason: String },
}

impl DomainError {
    /// Shorthand for [`DomainError::TemplateParse`].
    pub fn parse(reason: impl Into<String>) -> Self {
        Self::TemplateParse {
            reason: reason.into(),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateParse { reason } => vec![
                format!("Details: {}", reason),
                "Check the descriptor against the documented format".into(),
            ],
            Self::MissingRequiredField { field } => vec![
                format!("Add a '{}' entry to the template descriptor", field),
            ],
            Self::DuplicateTemplateId { id, first } => vec![
                format!("'{}' is already defined in {}", id, first.display()),
                "Rename one of the template directories".into(),
            ],
            Self::PathTraversalRejected { path, .. } => vec![
                format!("'{}' must stay inside its root", path),
                "Remove '..' components and leading separators".into(),
            ],
            Self::InvalidName { .. } => vec![
                "Use letters, digits, '-', '_' and '.'".into(),
                "Avoid reserved device names such as CON or NUL".into(),
                "Examples: my-game, MyGame, game_01".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DuplicateTemplateId { .. } => ErrorCategory::Conflict,
            Self::TemplateUnreadable { .. } => ErrorCategory::Internal,
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    Internal,
}
