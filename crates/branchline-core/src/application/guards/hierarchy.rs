//! Hierarchy existence checker.
//!
//! Confirms the *immediate* parent of a child exists before the child is
//! created. One capability for every parent kind, selected by [`ParentRef`].

use std::sync::Arc;

use tracing::debug;

use crate::{
    application::{
        ApplicationError,
        ports::{FranchiseRepository, OfficeRepository},
    },
    domain::ParentRef,
    error::BranchlineResult,
};

/// Resolves parent references against the franchise and office ports.
#[derive(Clone)]
pub struct HierarchyChecker {
    franchises: Arc<dyn FranchiseRepository>,
    offices: Arc<dyn OfficeRepository>,
}

impl HierarchyChecker {
    pub fn new(franchises: Arc<dyn FranchiseRepository>, offices: Arc<dyn OfficeRepository>) -> Self {
        Self {
            franchises,
            offices,
        }
    }

    /// Fail with `NotFound` if the referenced parent does not exist.
    pub async fn assert_parent_exists(&self, parent: ParentRef) -> BranchlineResult<()> {
        let exists = match parent {
            ParentRef::Franchise(id) => self.franchises.find_by_id(id).await?.is_some(),
            ParentRef::Office(id) => self.offices.find_by_id(id).await?.is_some(),
        };

        if !exists {
            debug!(%parent, "parent does not exist");
            return Err(ApplicationError::NotFound {
                kind: parent.kind(),
                id: parent.raw_id(),
            }
            .into());
        }

        Ok(())
    }
}
