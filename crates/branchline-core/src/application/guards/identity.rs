//! Identity checks that run before any I/O.

use crate::{application::ApplicationError, domain::EntityKind, error::BranchlineResult};

/// The update path id must equal the payload id.
///
/// A payload without an id never matches.
pub fn ensure_same_identity(path_id: i64, payload_id: Option<i64>) -> BranchlineResult<()> {
    if payload_id != Some(path_id) {
        return Err(ApplicationError::IdentifierMismatch {
            path_id,
            payload_id,
        }
        .into());
    }
    Ok(())
}

/// A create payload must not carry an id; storage assigns it.
pub fn ensure_unassigned(kind: EntityKind, payload_id: Option<i64>) -> BranchlineResult<()> {
    match payload_id {
        Some(id) => Err(ApplicationError::IdentifierPreassigned { kind, id }.into()),
        None => Ok(()),
    }
}
