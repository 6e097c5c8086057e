// ============================================================================
// domain/error.rs - VALIDATION ERROR DOMAIN
// ============================================================================

use thiserror::Error;

use crate::domain::value_objects::EntityKind;

/// Root domain error type.
///
/// Every variant is a `ValidationError` in the sense of the error taxonomy:
/// raised synchronously at construction, never retried, always surfaced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{kind} name cannot be null or blank")]
    BlankName { kind: EntityKind },

    #[error("product stock cannot be negative (got {stock})")]
    NegativeStock { stock: i64 },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::BlankName { kind } => vec![
                format!("Provide a non-empty {kind} name"),
                "Names are trimmed and stored upper-cased".into(),
            ],
            Self::NegativeStock { .. } => vec!["Stock must be zero or a positive integer".into()],
            Self::MissingRequiredField { field } => {
                vec![format!("Set the '{field}' field and try again")]
            }
        }
    }
}
