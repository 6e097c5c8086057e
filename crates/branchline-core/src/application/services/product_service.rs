//! Product Service - products under an office, plus the top-stock query.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        guards::{
            HierarchyChecker, NameCheck, UniquenessGuard, ensure_same_identity, ensure_unassigned,
        },
        ports::ProductRepository,
    },
    domain::{EntityKind, FranchiseId, Product, ProductId, top_stock_per_office},
    error::BranchlineResult,
};

/// Use cases for products.
#[derive(Clone)]
pub struct ProductService {
    products: Arc<dyn ProductRepository>,
    hierarchy: HierarchyChecker,
    names: UniquenessGuard,
}

impl ProductService {
    pub fn new(products: Arc<dyn ProductRepository>, hierarchy: HierarchyChecker) -> Self {
        Self {
            products,
            hierarchy,
            names: UniquenessGuard::new(EntityKind::Product),
        }
    }

    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get(&self, id: ProductId) -> BranchlineResult<Product> {
        info!("Product will be consulted");
        self.require(id).await
    }

    /// Create a product under an existing office.
    #[instrument(skip_all, fields(name = %product.name(), office_id = %product.office_id()))]
    pub async fn create(&self, product: Product) -> BranchlineResult<Product> {
        info!("Creating product");

        ensure_unassigned(EntityKind::Product, product.id().map(ProductId::get))?;
        self.hierarchy.assert_parent_exists(product.parent()).await?;
        self.names
            .assert_name_available(&*self.products, product.name(), NameCheck::Create)
            .await?;

        let saved = self.products.save(product).await?;
        info!(product_id = ?saved.id(), "Product created");
        Ok(saved)
    }

    /// Replace an existing product. The owning office cannot change.
    #[instrument(skip(self, product), fields(product_id = %id, name = %product.name()))]
    pub async fn update(&self, id: ProductId, product: Product) -> BranchlineResult<Product> {
        if let Err(e) = ensure_same_identity(id.get(), product.id().map(ProductId::get)) {
            warn!("IDs do not match");
            return Err(e);
        }

        info!("Updating product");

        let current = self.require(id).await?;
        if current.office_id() != product.office_id() {
            warn!(
                current = %current.office_id(),
                requested = %product.office_id(),
                "Product cannot change office"
            );
            return Err(ApplicationError::ParentChangeNotSupported {
                kind: EntityKind::Product,
                id: id.get(),
                parent_kind: EntityKind::Office,
                current: current.office_id().get(),
                requested: product.office_id().get(),
            }
            .into());
        }

        self.names
            .assert_name_available(&*self.products, product.name(), NameCheck::Update(id.get()))
            .await?;

        self.products.save(product).await
    }

    /// Delete a product by id, returning what was removed.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete(&self, id: ProductId) -> BranchlineResult<Product> {
        info!("Deleting product");

        let product = self.require(id).await?;
        self.products.delete(&product).await?;

        info!("Product deleted");
        Ok(product)
    }

    /// Highest-stock product of each office under a franchise.
    ///
    /// An unknown franchise, or one with no stocked offices, yields an empty
    /// list. Rows come back ordered by office id.
    #[instrument(skip(self))]
    pub async fn top_stock_by_franchise(
        &self,
        franchise_id: FranchiseId,
    ) -> BranchlineResult<Vec<Product>> {
        info!("Finding the products with more stock per office");

        let rows = self.products.top_stock_by_office(franchise_id).await?;
        let top = top_stock_per_office(rows);

        debug!(offices = top.len(), "top-stock rows");
        Ok(top)
    }

    async fn require(&self, id: ProductId) -> BranchlineResult<Product> {
        self.products.find_by_id(id).await?.ok_or_else(|| {
            ApplicationError::NotFound {
                kind: EntityKind::Product,
                id: id.get(),
            }
            .into()
        })
    }
}
