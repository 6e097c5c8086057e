//! The `Franchise` root aggregate and its detail view.
//!
//! A franchise owns zero or more offices, but that relationship is not a
//! field of the aggregate: offices are attached only when a detail view is
//! assembled, via [`FranchiseDetail`].

use serde::{Deserialize, Serialize};

use super::{DomainError, EntityName, Office};
use crate::domain::value_objects::{EntityKind, FranchiseId};

/// A validated franchise.
///
/// Every field is guaranteed consistent on construction:
/// - `name` is non-blank, trimmed and upper-cased
/// - `id` is `None` until the storage layer assigns one
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "FranchiseInput")]
pub struct Franchise {
    id: Option<FranchiseId>,
    name: EntityName,
}

impl Franchise {
    pub fn new(id: Option<FranchiseId>, name: impl AsRef<str>) -> Result<Self, DomainError> {
        Ok(Self {
            id,
            name: EntityName::parse(EntityKind::Franchise, name)?,
        })
    }

    pub const fn id(&self) -> Option<FranchiseId> {
        self.id
    }

    pub fn name(&self) -> &EntityName {
        &self.name
    }

    /// The same franchise carrying a storage-assigned identifier.
    pub fn with_id(self, id: FranchiseId) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }
}

/// Raw, unvalidated franchise fields as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FranchiseInput {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
}

impl TryFrom<FranchiseInput> for Franchise {
    type Error = DomainError;

    fn try_from(input: FranchiseInput) -> Result<Self, Self::Error> {
        Ok(Self {
            id: input.id.map(FranchiseId::new),
            name: EntityName::parse_opt(EntityKind::Franchise, input.name.as_deref())?,
        })
    }
}

/// A franchise together with the offices that belong to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FranchiseDetail {
    #[serde(flatten)]
    pub franchise: Franchise,
    pub offices: Vec<Office>,
}

impl FranchiseDetail {
    pub fn new(franchise: Franchise, offices: Vec<Office>) -> Self {
        Self { franchise, offices }
    }
}
