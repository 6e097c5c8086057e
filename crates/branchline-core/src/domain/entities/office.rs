//! The `Office` aggregate: belongs to exactly one franchise.

use serde::{Deserialize, Serialize};

use super::{DomainError, EntityName};
use crate::domain::value_objects::{EntityKind, FranchiseId, OfficeId, ParentRef};

/// A validated office.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "OfficeInput")]
pub struct Office {
    id: Option<OfficeId>,
    name: EntityName,
    franchise_id: FranchiseId,
}

impl Office {
    pub fn new(
        id: Option<OfficeId>,
        name: impl AsRef<str>,
        franchise_id: FranchiseId,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            id,
            name: EntityName::parse(EntityKind::Office, name)?,
            franchise_id,
        })
    }

    pub const fn id(&self) -> Option<OfficeId> {
        self.id
    }

    pub fn name(&self) -> &EntityName {
        &self.name
    }

    pub const fn franchise_id(&self) -> FranchiseId {
        self.franchise_id
    }

    /// The franchise this office must hang from.
    pub const fn parent(&self) -> ParentRef {
        ParentRef::Franchise(self.franchise_id)
    }

    pub fn with_id(self, id: OfficeId) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }
}

/// Raw, unvalidated office fields as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficeInput {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub franchise_id: Option<i64>,
}

impl TryFrom<OfficeInput> for Office {
    type Error = DomainError;

    fn try_from(input: OfficeInput) -> Result<Self, Self::Error> {
        let name = EntityName::parse_opt(EntityKind::Office, input.name.as_deref())?;
        let franchise_id = input
            .franchise_id
            .map(FranchiseId::new)
            .ok_or(DomainError::MissingRequiredField {
                field: "franchise_id",
            })?;

        Ok(Self {
            id: input.id.map(OfficeId::new),
            name,
            franchise_id,
        })
    }
}
