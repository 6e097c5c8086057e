//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from storage.
//! The `branchline-adapters` crate provides implementations.
//!
//! ## Design Notes
//!
//! - All lookups take the *normalized* name, which is the stored form
//! - Every call may suspend on I/O; nothing here holds state between calls
//! - `save` must enforce a unique-name constraint of its own and report a
//!   violation as `ApplicationError::NameConflict`; the service-level guard
//!   is only a pre-check

use async_trait::async_trait;

use crate::domain::{
    EntityName, Franchise, FranchiseId, Office, OfficeId, Product, ProductId,
};
use crate::error::BranchlineResult;

/// Name lookups shared by every repository.
///
/// The uniqueness guard works against this trait alone, so it does not care
/// which entity kind it is checking.
#[async_trait]
pub trait NameLookup: Send + Sync {
    /// Whether any record holds this normalized name.
    async fn exists_by_name(&self, name: &EntityName) -> BranchlineResult<bool>;

    /// Raw identifier of the record holding this normalized name, if any.
    async fn find_id_by_name(&self, name: &EntityName) -> BranchlineResult<Option<i64>>;
}

/// Port for franchise storage.
///
/// Implemented by:
/// - `branchline_adapters::InMemoryFranchises` (memory / JSON snapshot)
#[async_trait]
pub trait FranchiseRepository: NameLookup {
    async fn find_by_id(&self, id: FranchiseId) -> BranchlineResult<Option<Franchise>>;

    /// Insert (no id) or replace (id present). Returns the stored value.
    async fn save(&self, franchise: Franchise) -> BranchlineResult<Franchise>;
}

/// Port for office storage.
#[async_trait]
pub trait OfficeRepository: NameLookup {
    async fn find_by_id(&self, id: OfficeId) -> BranchlineResult<Option<Office>>;

    async fn save(&self, office: Office) -> BranchlineResult<Office>;

    /// All offices belonging to a franchise, ordered by id.
    async fn list_by_franchise_id(&self, franchise_id: FranchiseId)
    -> BranchlineResult<Vec<Office>>;
}

/// Port for product storage.
#[async_trait]
pub trait ProductRepository: NameLookup {
    async fn find_by_id(&self, id: ProductId) -> BranchlineResult<Option<Product>>;

    async fn save(&self, product: Product) -> BranchlineResult<Product>;

    async fn delete(&self, product: &Product) -> BranchlineResult<()>;

    /// Top-stock product of every office under a franchise.
    ///
    /// Must honour `crate::domain::ranking` semantics: one row per office
    /// that has products, max stock, ties to the lowest product id.
    async fn top_stock_by_office(&self, franchise_id: FranchiseId)
    -> BranchlineResult<Vec<Product>>;
}
