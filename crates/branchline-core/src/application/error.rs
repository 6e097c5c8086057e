//! Application layer errors.
//!
//! These errors represent failures of the consistency rules that need
//! storage to decide (existence, uniqueness, identity). Pure input
//! validation errors are `DomainError` from `crate::domain`.

use thiserror::Error;

use crate::domain::{EntityKind, EntityName};
use crate::error::ErrorCategory;

/// Errors that occur while orchestrating a use case.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// The entity (by id, or a required parent) does not exist.
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: i64 },

    /// The normalized name already belongs to a different record.
    #[error("{kind} with the name [{name}] already exists")]
    NameConflict { kind: EntityKind, name: EntityName },

    /// Update path id disagrees with the payload id.
    #[error("identifier mismatch: path id {path_id} does not match payload id {payload_id:?}")]
    IdentifierMismatch {
        path_id: i64,
        payload_id: Option<i64>,
    },

    /// Create payload already carries an identifier.
    #[error("{kind} identifiers are assigned on creation; payload carried id {id}")]
    IdentifierPreassigned { kind: EntityKind, id: i64 },

    /// Update tried to move a child under a different parent.
    #[error("{kind} {id} cannot be moved from {parent_kind} {current} to {requested}")]
    ParentChangeNotSupported {
        kind: EntityKind,
        id: i64,
        parent_kind: EntityKind,
        current: i64,
        requested: i64,
    },

    /// The storage collaborator failed.
    #[error("Storage error: {reason}")]
    Storage { reason: String },

    /// Store access failed (lock poisoned).
    #[error("Store lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NotFound { kind, id } => vec![
                format!("No {kind} exists with id {id}"),
                format!("Check the {kind} id and try again"),
            ],
            Self::NameConflict { kind, name } => vec![
                format!("Another {kind} is already named {name}"),
                "Names are compared after trimming and upper-casing".into(),
                "Choose a different name".into(),
            ],
            Self::IdentifierMismatch { .. } => {
                vec!["The id in the request path must equal the id in the payload".into()]
            }
            Self::IdentifierPreassigned { .. } => {
                vec!["Omit the id when creating; storage assigns it".into()]
            }
            Self::ParentChangeNotSupported { parent_kind, .. } => vec![
                format!("Moving to a different {parent_kind} is not supported"),
                "Create a new record under the target parent instead".into(),
            ],
            Self::Storage { .. } | Self::StoreLockError => vec![
                "The storage backend failed".into(),
                "Try again in a moment".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::NameConflict { .. } => ErrorCategory::Conflict,
            Self::IdentifierMismatch { .. }
            | Self::IdentifierPreassigned { .. }
            | Self::ParentChangeNotSupported { .. } => ErrorCategory::Validation,
            Self::Storage { .. } | Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
