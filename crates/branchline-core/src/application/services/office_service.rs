//! Office Service - offices under a franchise.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        guards::{
            HierarchyChecker, NameCheck, UniquenessGuard, ensure_same_identity, ensure_unassigned,
        },
        ports::OfficeRepository,
    },
    domain::{EntityKind, Office, OfficeId},
    error::BranchlineResult,
};

/// Use cases for offices.
#[derive(Clone)]
pub struct OfficeService {
    offices: Arc<dyn OfficeRepository>,
    hierarchy: HierarchyChecker,
    names: UniquenessGuard,
}

impl OfficeService {
    pub fn new(offices: Arc<dyn OfficeRepository>, hierarchy: HierarchyChecker) -> Self {
        Self {
            offices,
            hierarchy,
            names: UniquenessGuard::new(EntityKind::Office),
        }
    }

    #[instrument(skip(self), fields(office_id = %id))]
    pub async fn get(&self, id: OfficeId) -> BranchlineResult<Office> {
        info!("Office will be consulted");
        self.require(id).await
    }

    /// Create an office under an existing franchise.
    #[instrument(skip_all, fields(name = %office.name(), franchise_id = %office.franchise_id()))]
    pub async fn create(&self, office: Office) -> BranchlineResult<Office> {
        info!("Creating office");

        ensure_unassigned(EntityKind::Office, office.id().map(OfficeId::get))?;
        self.hierarchy.assert_parent_exists(office.parent()).await?;
        self.names
            .assert_name_available(&*self.offices, office.name(), NameCheck::Create)
            .await?;

        let saved = self.offices.save(office).await?;
        info!(office_id = ?saved.id(), "Office created");
        Ok(saved)
    }

    /// Replace an existing office. The owning franchise cannot change.
    #[instrument(skip(self, office), fields(office_id = %id, name = %office.name()))]
    pub async fn update(&self, id: OfficeId, office: Office) -> BranchlineResult<Office> {
        if let Err(e) = ensure_same_identity(id.get(), office.id().map(OfficeId::get)) {
            warn!("IDs do not match");
            return Err(e);
        }

        info!("Updating office");

        let current = self.require(id).await?;
        if current.franchise_id() != office.franchise_id() {
            warn!(
                current = %current.franchise_id(),
                requested = %office.franchise_id(),
                "Office cannot change franchise"
            );
            return Err(ApplicationError::ParentChangeNotSupported {
                kind: EntityKind::Office,
                id: id.get(),
                parent_kind: EntityKind::Franchise,
                current: current.franchise_id().get(),
                requested: office.franchise_id().get(),
            }
            .into());
        }

        self.names
            .assert_name_available(&*self.offices, office.name(), NameCheck::Update(id.get()))
            .await?;

        self.offices.save(office).await
    }

    async fn require(&self, id: OfficeId) -> BranchlineResult<Office> {
        self.offices.find_by_id(id).await?.ok_or_else(|| {
            ApplicationError::NotFound {
                kind: EntityKind::Office,
                id: id.get(),
            }
            .into()
        })
    }
}
