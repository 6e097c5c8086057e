//! Franchise Service - root aggregate use cases.
//!
//! Franchises have no parent, so creation is validate → name available →
//! persist. Detail retrieval attaches the franchise's offices.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        guards::{NameCheck, UniquenessGuard, ensure_same_identity, ensure_unassigned},
        ports::{FranchiseRepository, OfficeRepository},
    },
    domain::{EntityKind, Franchise, FranchiseDetail, FranchiseId, Office},
    error::BranchlineResult,
};

/// Use cases for franchises.
#[derive(Clone)]
pub struct FranchiseService {
    franchises: Arc<dyn FranchiseRepository>,
    offices: Arc<dyn OfficeRepository>,
    names: UniquenessGuard,
}

impl FranchiseService {
    pub fn new(franchises: Arc<dyn FranchiseRepository>, offices: Arc<dyn OfficeRepository>) -> Self {
        Self {
            franchises,
            offices,
            names: UniquenessGuard::new(EntityKind::Franchise),
        }
    }

    /// Get a franchise with its offices attached.
    #[instrument(skip(self), fields(franchise_id = %id))]
    pub async fn get(&self, id: FranchiseId) -> BranchlineResult<FranchiseDetail> {
        info!("Franchise will be consulted");

        let franchise = self.require(id).await?;
        let offices = self.list_offices_of(id).await?;

        Ok(FranchiseDetail::new(franchise, offices))
    }

    /// Create a new franchise.
    #[instrument(skip_all, fields(name = %franchise.name()))]
    pub async fn create(&self, franchise: Franchise) -> BranchlineResult<Franchise> {
        info!("Creating franchise");

        ensure_unassigned(EntityKind::Franchise, franchise.id().map(FranchiseId::get))?;
        self.names
            .assert_name_available(&*self.franchises, franchise.name(), NameCheck::Create)
            .await?;

        let saved = self.franchises.save(franchise).await?;
        info!(franchise_id = ?saved.id(), "Franchise created");
        Ok(saved)
    }

    /// Replace an existing franchise.
    ///
    /// `id` is the identifier the caller addressed; it must equal the id in
    /// the payload or nothing else happens.
    #[instrument(skip(self, franchise), fields(franchise_id = %id, name = %franchise.name()))]
    pub async fn update(&self, id: FranchiseId, franchise: Franchise) -> BranchlineResult<Franchise> {
        if let Err(e) = ensure_same_identity(id.get(), franchise.id().map(FranchiseId::get)) {
            warn!("IDs do not match");
            return Err(e);
        }

        info!("Updating franchise");

        self.require(id).await?;
        self.names
            .assert_name_available(
                &*self.franchises,
                franchise.name(),
                NameCheck::Update(id.get()),
            )
            .await?;

        self.franchises.save(franchise).await
    }

    /// All offices of a franchise. An unknown franchise simply has none.
    #[instrument(skip(self))]
    pub async fn list_offices_of(&self, franchise_id: FranchiseId) -> BranchlineResult<Vec<Office>> {
        info!("Checking offices for the franchise");
        self.offices.list_by_franchise_id(franchise_id).await
    }

    async fn require(&self, id: FranchiseId) -> BranchlineResult<Franchise> {
        self.franchises.find_by_id(id).await?.ok_or_else(|| {
            ApplicationError::NotFound {
                kind: EntityKind::Franchise,
                id: id.get(),
            }
            .into()
        })
    }
}
