//! Uniqueness guard: name collisions per entity kind.
//!
//! This is a best-effort pre-check. Two concurrent creates with the same
//! name can both pass it; the storage constraint behind `save` is the
//! authoritative guard.

use tracing::debug;

use crate::{
    application::{ApplicationError, ports::NameLookup},
    domain::{EntityKind, EntityName},
    error::BranchlineResult,
};

/// How a name is being claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameCheck {
    /// A new record: any holder of the name is a conflict.
    Create,
    /// An existing record (raw id): the record may keep its own name.
    Update(i64),
}

/// Checks name availability for one entity kind.
#[derive(Debug, Clone, Copy)]
pub struct UniquenessGuard {
    kind: EntityKind,
}

impl UniquenessGuard {
    pub const fn new(kind: EntityKind) -> Self {
        Self { kind }
    }

    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Fail with `NameConflict` if `name` belongs to a different record.
    ///
    /// `name` is already normalized, since `EntityName` cannot be built any
    /// other way.
    pub async fn assert_name_available<L>(
        &self,
        lookup: &L,
        name: &EntityName,
        check: NameCheck,
    ) -> BranchlineResult<()>
    where
        L: NameLookup + ?Sized,
    {
        let taken = match check {
            NameCheck::Create => lookup.exists_by_name(name).await?,
            NameCheck::Update(own_id) => match lookup.find_id_by_name(name).await? {
                Some(holder) => holder != own_id,
                None => false,
            },
        };

        if taken {
            debug!(kind = %self.kind, %name, ?check, "name already taken");
            return Err(ApplicationError::NameConflict {
                kind: self.kind,
                name: name.clone(),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::output::mocks::MockFranchises;
    use crate::error::BranchlineError;

    fn name(raw: &str) -> EntityName {
        EntityName::parse(EntityKind::Franchise, raw).unwrap()
    }

    fn guard() -> UniquenessGuard {
        UniquenessGuard::new(EntityKind::Franchise)
    }

    #[tokio::test]
    async fn create_conflicts_with_any_holder() {
        let mut lookup = MockFranchises::new();
        lookup
            .expect_exists_by_name()
            .withf(|n| n.as_str() == "ACME")
            .times(1)
            .returning(|_| Ok(true));

        let result = guard()
            .assert_name_available(&lookup, &name(" acme "), NameCheck::Create)
            .await;

        assert!(matches!(
            result,
            Err(BranchlineError::Application(ApplicationError::NameConflict { .. }))
        ));
    }

    #[tokio::test]
    async fn create_passes_when_name_is_free() {
        let mut lookup = MockFranchises::new();
        lookup.expect_exists_by_name().returning(|_| Ok(false));

        guard()
            .assert_name_available(&lookup, &name("acme"), NameCheck::Create)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_may_keep_own_name() {
        let mut lookup = MockFranchises::new();
        lookup.expect_find_id_by_name().returning(|_| Ok(Some(1)));

        guard()
            .assert_name_available(&lookup, &name("acme"), NameCheck::Update(1))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_cannot_take_another_records_name() {
        let mut lookup = MockFranchises::new();
        lookup.expect_find_id_by_name().returning(|_| Ok(Some(2)));

        let result = guard()
            .assert_name_available(&lookup, &name("acme"), NameCheck::Update(1))
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn update_to_unused_name_passes() {
        let mut lookup = MockFranchises::new();
        lookup.expect_find_id_by_name().returning(|_| Ok(None));

        guard()
            .assert_name_available(&lookup, &name("brand new"), NameCheck::Update(1))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn lookup_failure_propagates() {
        let mut lookup = MockFranchises::new();
        lookup
            .expect_exists_by_name()
            .returning(|_| Err(ApplicationError::StoreLockError.into()));

        let result = guard()
            .assert_name_available(&lookup, &name("acme"), NameCheck::Create)
            .await;

        assert_eq!(result, Err(ApplicationError::StoreLockError.into()));
    }
}
