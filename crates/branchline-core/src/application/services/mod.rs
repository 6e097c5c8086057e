//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer, the guards and the ports. Each
//! aggregate has its own service; [`Catalog`] wires all three against one
//! set of repositories.

pub mod franchise_service;
pub mod office_service;
pub mod product_service;

use std::sync::Arc;

pub use franchise_service::FranchiseService;
pub use office_service::OfficeService;
pub use product_service::ProductService;

use crate::application::{
    guards::HierarchyChecker,
    ports::{FranchiseRepository, OfficeRepository, ProductRepository},
};

/// The three aggregate services sharing one storage backend.
#[derive(Clone)]
pub struct Catalog {
    pub franchises: FranchiseService,
    pub offices: OfficeService,
    pub products: ProductService,
}

impl Catalog {
    pub fn new(
        franchises: Arc<dyn FranchiseRepository>,
        offices: Arc<dyn OfficeRepository>,
        products: Arc<dyn ProductRepository>,
    ) -> Self {
        let hierarchy = HierarchyChecker::new(Arc::clone(&franchises), Arc::clone(&offices));

        Self {
            franchises: FranchiseService::new(franchises, Arc::clone(&offices)),
            offices: OfficeService::new(offices, hierarchy.clone()),
            products: ProductService::new(products, hierarchy),
        }
    }
}
