//! Unified error handling for Branchline Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with a category the driving adapters map to their own status
//! codes.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Branchline Core operations.
///
/// Every error is terminal for the request that raised it; nothing is
/// retried or recovered inside the core.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BranchlineError {
    /// Malformed input (blank name, negative stock, missing reference).
    #[error("Validation error: {0}")]
    Domain(#[from] DomainError),

    /// Existence, uniqueness and identity rule violations.
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl BranchlineError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in Branchline".into(),
                "Please report this issue at: https://github.com/cosecruz/branchline/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(_) => ErrorCategory::Validation,
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Whether the caller caused this error (bad input or a business rule).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Validation | ErrorCategory::Conflict | ErrorCategory::NotFound
        )
    }

    /// The HTTP status a transport adapter should answer with.
    pub fn status_equivalent(&self) -> u16 {
        match self.category() {
            ErrorCategory::NotFound => 404,
            ErrorCategory::Validation | ErrorCategory::Conflict => 400,
            ErrorCategory::Internal => 500,
        }
    }

    /// Shorthand for the not-found case raised by lookups.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Application(ApplicationError::NotFound { .. })
        )
    }
}

/// Error categories for UI display and status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    NotFound,
    Internal,
}

/// Convenient result type alias.
pub type BranchlineResult<T> = Result<T, BranchlineError>;
