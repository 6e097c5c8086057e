//! In-memory storage for franchises, offices and products.
//!
//! One [`InMemoryStore`] owns all three tables. The repository ports are
//! implemented by thin per-kind handles sharing that state, because each
//! kind needs its own `NameLookup`.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use branchline_core::{
    application::{
        ApplicationError, Catalog,
        ports::{FranchiseRepository, NameLookup, OfficeRepository, ProductRepository},
    },
    domain::{
        EntityKind, EntityName, Franchise, FranchiseId, Office, OfficeId, Product, ProductId,
        top_stock_per_office,
    },
    error::{BranchlineError, BranchlineResult},
};

/// Persists the full table state a write would produce. The write is only
/// applied once `flush` succeeds.
pub(crate) trait Flush: Send + Sync {
    fn flush(&self, snapshot: &Snapshot) -> BranchlineResult<()>;
}

/// Serializable form of the whole store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub franchises: Vec<Franchise>,
    #[serde(default)]
    pub offices: Vec<Office>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub next_ids: NextIds,
}

/// Next identifier per table. Ids are never reused, even after a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextIds {
    pub franchise: i64,
    pub office: i64,
    pub product: i64,
}

impl Default for NextIds {
    fn default() -> Self {
        Self {
            franchise: 1,
            office: 1,
            product: 1,
        }
    }
}

#[derive(Debug, Default, Clone)]
struct Tables {
    franchises: BTreeMap<FranchiseId, Franchise>,
    offices: BTreeMap<OfficeId, Office>,
    products: BTreeMap<ProductId, Product>,
    next_ids: NextIds,
}

impl Tables {
    fn from_snapshot(snapshot: Snapshot) -> BranchlineResult<Self> {
        let mut tables = Self::default();

        load_rows(
            EntityKind::Franchise,
            snapshot.franchises,
            FranchiseId::new,
            &mut tables.franchises,
        )?;
        load_rows(
            EntityKind::Office,
            snapshot.offices,
            OfficeId::new,
            &mut tables.offices,
        )?;
        load_rows(
            EntityKind::Product,
            snapshot.products,
            ProductId::new,
            &mut tables.products,
        )?;

        // Never hand out an id at or below one already on disk.
        let next = |max: Option<i64>, stored: i64| max.map_or(stored, |m| stored.max(m + 1));
        tables.next_ids = NextIds {
            franchise: next(
                tables.franchises.keys().next_back().map(|id| id.get()),
                snapshot.next_ids.franchise,
            ),
            office: next(
                tables.offices.keys().next_back().map(|id| id.get()),
                snapshot.next_ids.office,
            ),
            product: next(
                tables.products.keys().next_back().map(|id| id.get()),
                snapshot.next_ids.product,
            ),
        };

        Ok(tables)
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            franchises: self.franchises.values().cloned().collect(),
            offices: self.offices.values().cloned().collect(),
            products: self.products.values().cloned().collect(),
            next_ids: self.next_ids,
        }
    }
}

/// Fill `table` from stored rows, holding them to the same id and name
/// constraints `save` enforces.
fn load_rows<K, R>(
    kind: EntityKind,
    rows: Vec<R>,
    key: fn(i64) -> K,
    table: &mut BTreeMap<K, R>,
) -> BranchlineResult<()>
where
    K: Ord,
    R: Row,
{
    for row in rows {
        let id = row
            .raw_id()
            .ok_or_else(|| corrupt(format!("stored {kind} record has no id")))?;
        if table.contains_key(&key(id)) {
            return Err(corrupt(format!("duplicate {kind} id {id} in stored data")));
        }
        if let Some(holder) = holder_of(table.values(), row.row_name()) {
            return Err(corrupt(format!(
                "stored {kind} {id} reuses the name [{}] already used by {kind} {holder}",
                row.row_name()
            )));
        }
        table.insert(key(id), row);
    }
    Ok(())
}

fn corrupt(reason: String) -> BranchlineError {
    ApplicationError::Storage { reason }.into()
}

/// Thread-safe in-memory store.
///
/// `save` enforces the unique-name constraint under the write lock, so it
/// holds even when two callers both passed the service pre-check.
#[derive(Clone)]
pub struct InMemoryStore {
    inner: Arc<RwLock<Tables>>,
    sink: Option<Arc<dyn Flush>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Tables::default())),
            sink: None,
        }
    }

    /// Create a store holding the records of `snapshot`.
    pub fn from_snapshot(snapshot: Snapshot) -> BranchlineResult<Self> {
        Ok(Self {
            inner: Arc::new(RwLock::new(Tables::from_snapshot(snapshot)?)),
            sink: None,
        })
    }

    pub(crate) fn with_sink(mut self, sink: Arc<dyn Flush>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> BranchlineResult<Snapshot> {
        Ok(self.read()?.snapshot())
    }

    pub fn franchises(&self) -> InMemoryFranchises {
        InMemoryFranchises(self.clone())
    }

    pub fn offices(&self) -> InMemoryOffices {
        InMemoryOffices(self.clone())
    }

    pub fn products(&self) -> InMemoryProducts {
        InMemoryProducts(self.clone())
    }

    /// Services wired against this store.
    pub fn catalog(&self) -> Catalog {
        Catalog::new(
            Arc::new(self.franchises()),
            Arc::new(self.offices()),
            Arc::new(self.products()),
        )
    }

    fn read(&self) -> BranchlineResult<RwLockReadGuard<'_, Tables>> {
        self.inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }

    fn write(&self) -> BranchlineResult<RwLockWriteGuard<'_, Tables>> {
        self.inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }

    /// Flush `next`, then make it the live state. A failed flush leaves
    /// `live` untouched.
    fn commit(&self, live: &mut Tables, next: Tables) -> BranchlineResult<()> {
        if let Some(sink) = &self.sink {
            sink.flush(&next.snapshot())?;
        }
        *live = next;
        Ok(())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Stored rows expose their id and name for the unique-name constraint.
trait Row {
    fn raw_id(&self) -> Option<i64>;
    fn row_name(&self) -> &EntityName;
}

impl Row for Franchise {
    fn raw_id(&self) -> Option<i64> {
        self.id().map(FranchiseId::get)
    }
    fn row_name(&self) -> &EntityName {
        self.name()
    }
}

impl Row for Office {
    fn raw_id(&self) -> Option<i64> {
        self.id().map(OfficeId::get)
    }
    fn row_name(&self) -> &EntityName {
        self.name()
    }
}

impl Row for Product {
    fn raw_id(&self) -> Option<i64> {
        self.id().map(ProductId::get)
    }
    fn row_name(&self) -> &EntityName {
        self.name()
    }
}

/// Id of the row named `name`, if any.
fn holder_of<'a, R, I>(rows: I, name: &EntityName) -> Option<i64>
where
    R: Row + 'a,
    I: IntoIterator<Item = &'a R>,
{
    rows.into_iter()
        .find(|row| row.row_name() == name)
        .and_then(Row::raw_id)
}

fn conflict(kind: EntityKind, name: &EntityName) -> BranchlineError {
    ApplicationError::NameConflict {
        kind,
        name: name.clone(),
    }
    .into()
}

fn not_found(kind: EntityKind, id: i64) -> BranchlineError {
    ApplicationError::NotFound { kind, id }.into()
}

// ============================================================================
// Franchises
// ============================================================================

/// `FranchiseRepository` over an [`InMemoryStore`].
#[derive(Clone)]
pub struct InMemoryFranchises(InMemoryStore);

#[async_trait]
impl NameLookup for InMemoryFranchises {
    async fn exists_by_name(&self, name: &EntityName) -> BranchlineResult<bool> {
        Ok(self.find_id_by_name(name).await?.is_some())
    }

    async fn find_id_by_name(&self, name: &EntityName) -> BranchlineResult<Option<i64>> {
        let tables = self.0.read()?;
        Ok(holder_of(tables.franchises.values(), name))
    }
}

#[async_trait]
impl FranchiseRepository for InMemoryFranchises {
    async fn find_by_id(&self, id: FranchiseId) -> BranchlineResult<Option<Franchise>> {
        Ok(self.0.read()?.franchises.get(&id).cloned())
    }

    async fn save(&self, franchise: Franchise) -> BranchlineResult<Franchise> {
        let mut tables = self.0.write()?;

        let id = match franchise.id() {
            Some(id) if !tables.franchises.contains_key(&id) => {
                return Err(not_found(EntityKind::Franchise, id.get()));
            }
            Some(id) => id,
            None => FranchiseId::new(tables.next_ids.franchise),
        };
        if holder_of(tables.franchises.values(), franchise.name())
            .is_some_and(|holder| holder != id.get())
        {
            return Err(conflict(EntityKind::Franchise, franchise.name()));
        }

        let stored = franchise.with_id(id);
        let mut next = tables.clone();
        if id.get() == next.next_ids.franchise {
            next.next_ids.franchise += 1;
        }
        next.franchises.insert(id, stored.clone());
        self.0.commit(&mut tables, next)?;

        debug!(franchise_id = %id, "franchise stored");
        Ok(stored)
    }
}

// ============================================================================
// Offices
// ============================================================================

/// `OfficeRepository` over an [`InMemoryStore`].
#[derive(Clone)]
pub struct InMemoryOffices(InMemoryStore);

#[async_trait]
impl NameLookup for InMemoryOffices {
    async fn exists_by_name(&self, name: &EntityName) -> BranchlineResult<bool> {
        Ok(self.find_id_by_name(name).await?.is_some())
    }

    async fn find_id_by_name(&self, name: &EntityName) -> BranchlineResult<Option<i64>> {
        let tables = self.0.read()?;
        Ok(holder_of(tables.offices.values(), name))
    }
}

#[async_trait]
impl OfficeRepository for InMemoryOffices {
    async fn find_by_id(&self, id: OfficeId) -> BranchlineResult<Option<Office>> {
        Ok(self.0.read()?.offices.get(&id).cloned())
    }

    async fn save(&self, office: Office) -> BranchlineResult<Office> {
        let mut tables = self.0.write()?;

        let id = match office.id() {
            Some(id) if !tables.offices.contains_key(&id) => {
                return Err(not_found(EntityKind::Office, id.get()));
            }
            Some(id) => id,
            None => OfficeId::new(tables.next_ids.office),
        };
        if holder_of(tables.offices.values(), office.name())
            .is_some_and(|holder| holder != id.get())
        {
            return Err(conflict(EntityKind::Office, office.name()));
        }

        let stored = office.with_id(id);
        let mut next = tables.clone();
        if id.get() == next.next_ids.office {
            next.next_ids.office += 1;
        }
        next.offices.insert(id, stored.clone());
        self.0.commit(&mut tables, next)?;

        debug!(office_id = %id, "office stored");
        Ok(stored)
    }

    async fn list_by_franchise_id(
        &self,
        franchise_id: FranchiseId,
    ) -> BranchlineResult<Vec<Office>> {
        let tables = self.0.read()?;
        Ok(tables
            .offices
            .values()
            .filter(|office| office.franchise_id() == franchise_id)
            .cloned()
            .collect())
    }
}

// ============================================================================
// Products
// ============================================================================

/// `ProductRepository` over an [`InMemoryStore`].
#[derive(Clone)]
pub struct InMemoryProducts(InMemoryStore);

#[async_trait]
impl NameLookup for InMemoryProducts {
    async fn exists_by_name(&self, name: &EntityName) -> BranchlineResult<bool> {
        Ok(self.find_id_by_name(name).await?.is_some())
    }

    async fn find_id_by_name(&self, name: &EntityName) -> BranchlineResult<Option<i64>> {
        let tables = self.0.read()?;
        Ok(holder_of(tables.products.values(), name))
    }
}

#[async_trait]
impl ProductRepository for InMemoryProducts {
    async fn find_by_id(&self, id: ProductId) -> BranchlineResult<Option<Product>> {
        Ok(self.0.read()?.products.get(&id).cloned())
    }

    async fn save(&self, product: Product) -> BranchlineResult<Product> {
        let mut tables = self.0.write()?;

        let id = match product.id() {
            Some(id) if !tables.products.contains_key(&id) => {
                return Err(not_found(EntityKind::Product, id.get()));
            }
            Some(id) => id,
            None => ProductId::new(tables.next_ids.product),
        };
        if holder_of(tables.products.values(), product.name())
            .is_some_and(|holder| holder != id.get())
        {
            return Err(conflict(EntityKind::Product, product.name()));
        }

        let stored = product.with_id(id);
        let mut next = tables.clone();
        if id.get() == next.next_ids.product {
            next.next_ids.product += 1;
        }
        next.products.insert(id, stored.clone());
        self.0.commit(&mut tables, next)?;

        debug!(product_id = %id, "product stored");
        Ok(stored)
    }

    async fn delete(&self, product: &Product) -> BranchlineResult<()> {
        let Some(id) = product.id() else {
            return Err(ApplicationError::Storage {
                reason: "cannot delete a product that was never stored".into(),
            }
            .into());
        };

        let mut tables = self.0.write()?;
        if !tables.products.contains_key(&id) {
            return Err(not_found(EntityKind::Product, id.get()));
        }
        let mut next = tables.clone();
        next.products.remove(&id);
        self.0.commit(&mut tables, next)?;

        debug!(product_id = %id, "product deleted");
        Ok(())
    }

    async fn top_stock_by_office(
        &self,
        franchise_id: FranchiseId,
    ) -> BranchlineResult<Vec<Product>> {
        let tables = self.0.read()?;

        let candidates = tables
            .products
            .values()
            .filter(|product| {
                tables
                    .offices
                    .get(&product.office_id())
                    .is_some_and(|office| office.franchise_id() == franchise_id)
            })
            .cloned();

        Ok(top_stock_per_office(candidates))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;

    /// Sink whose flushes fail while `failing` is set.
    #[derive(Default)]
    struct SwitchableSink {
        failing: AtomicBool,
    }

    impl SwitchableSink {
        fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }
    }

    impl Flush for SwitchableSink {
        fn flush(&self, _snapshot: &Snapshot) -> BranchlineResult<()> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(ApplicationError::Storage {
                    reason: "disk full".into(),
                }
                .into());
            }
            Ok(())
        }
    }

    fn store_with_sink() -> (InMemoryStore, Arc<SwitchableSink>) {
        let sink = Arc::new(SwitchableSink::default());
        let store = InMemoryStore::new().with_sink(sink.clone());
        (store, sink)
    }

    fn name(kind: EntityKind, raw: &str) -> EntityName {
        EntityName::parse(kind, raw).unwrap()
    }

    #[tokio::test]
    async fn ids_are_sequential_from_one() {
        let store = InMemoryStore::new();
        let franchises = store.franchises();

        let a = franchises
            .save(Franchise::new(None, "a").unwrap())
            .await
            .unwrap();
        let b = franchises
            .save(Franchise::new(None, "b").unwrap())
            .await
            .unwrap();

        assert_eq!(a.id(), Some(FranchiseId::new(1)));
        assert_eq!(b.id(), Some(FranchiseId::new(2)));
    }

    #[tokio::test]
    async fn save_enforces_unique_names() {
        let store = InMemoryStore::new();
        let franchises = store.franchises();
        franchises
            .save(Franchise::new(None, "acme").unwrap())
            .await
            .unwrap();

        let err = franchises
            .save(Franchise::new(None, " ACME ").unwrap())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            BranchlineError::Application(ApplicationError::NameConflict { .. })
        ));
    }

    #[tokio::test]
    async fn names_are_unique_per_kind_only() {
        let store = InMemoryStore::new();
        let franchise = store
            .franchises()
            .save(Franchise::new(None, "shared").unwrap())
            .await
            .unwrap();
        let franchise_id = franchise.id().unwrap();

        store
            .offices()
            .save(Office::new(None, "shared", franchise_id).unwrap())
            .await
            .unwrap();

        assert!(
            store
                .offices()
                .exists_by_name(&name(EntityKind::Office, "shared"))
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn replace_keeps_id_and_allows_own_name() {
        let store = InMemoryStore::new();
        let products = store.products();
        let saved = products
            .save(Product::new(None, "widget", 1, OfficeId::new(1)).unwrap())
            .await
            .unwrap();
        let id = saved.id().unwrap();

        let updated = products
            .save(Product::new(Some(id), "widget", 9, OfficeId::new(1)).unwrap())
            .await
            .unwrap();

        assert_eq!(updated.id(), Some(id));
        assert_eq!(
            products.find_by_id(id).await.unwrap().map(|p| p.stock()),
            Some(9)
        );
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reused() {
        let store = InMemoryStore::new();
        let products = store.products();
        let first = products
            .save(Product::new(None, "a", 1, OfficeId::new(1)).unwrap())
            .await
            .unwrap();

        products.delete(&first).await.unwrap();
        let second = products
            .save(Product::new(None, "b", 1, OfficeId::new(1)).unwrap())
            .await
            .unwrap();

        assert_eq!(second.id(), Some(ProductId::new(2)));
    }

    #[test]
    fn snapshot_without_ids_is_rejected() {
        let snapshot = Snapshot {
            franchises: vec![Franchise::new(None, "acme").unwrap()],
            ..Snapshot::default()
        };

        assert!(InMemoryStore::from_snapshot(snapshot).is_err());
    }

    #[test]
    fn loaded_snapshot_continues_id_sequence() {
        let snapshot = Snapshot {
            franchises: vec![Franchise::new(Some(FranchiseId::new(7)), "acme").unwrap()],
            ..Snapshot::default()
        };

        let store = InMemoryStore::from_snapshot(snapshot).unwrap();
        assert_eq!(store.snapshot().unwrap().next_ids.franchise, 8);
    }

    #[tokio::test]
    async fn failed_flush_discards_the_write() {
        let (store, sink) = store_with_sink();
        let franchises = store.franchises();
        sink.set_failing(true);

        let err = franchises
            .save(Franchise::new(None, "acme").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BranchlineError::Application(ApplicationError::Storage { .. })
        ));
        assert_eq!(franchises.find_by_id(FranchiseId::new(1)).await.unwrap(), None);
        assert!(
            !franchises
                .exists_by_name(&name(EntityKind::Franchise, "acme"))
                .await
                .unwrap()
        );
        assert_eq!(store.snapshot().unwrap().next_ids.franchise, 1);

        sink.set_failing(false);
        let saved = franchises
            .save(Franchise::new(None, "acme").unwrap())
            .await
            .unwrap();
        assert_eq!(saved.id(), Some(FranchiseId::new(1)));
    }

    #[tokio::test]
    async fn failed_flush_keeps_replaced_row() {
        let (store, sink) = store_with_sink();
        let offices = store.offices();
        let north = offices
            .save(Office::new(None, "north", FranchiseId::new(1)).unwrap())
            .await
            .unwrap();
        let id = north.id().unwrap();

        sink.set_failing(true);
        assert!(
            offices
                .save(Office::new(Some(id), "south", FranchiseId::new(1)).unwrap())
                .await
                .is_err()
        );

        let kept = offices.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(kept.name().as_str(), "NORTH");
    }

    #[tokio::test]
    async fn failed_flush_keeps_deleted_product() {
        let (store, sink) = store_with_sink();
        let products = store.products();
        let widget = products
            .save(Product::new(None, "widget", 3, OfficeId::new(1)).unwrap())
            .await
            .unwrap();

        sink.set_failing(true);
        assert!(products.delete(&widget).await.is_err());
        assert!(products.find_by_id(widget.id().unwrap()).await.unwrap().is_some());

        sink.set_failing(false);
        products.delete(&widget).await.unwrap();
        assert!(products.find_by_id(widget.id().unwrap()).await.unwrap().is_none());
    }

    #[test]
    fn snapshot_with_duplicate_ids_is_rejected() {
        let snapshot = Snapshot {
            offices: vec![
                Office::new(Some(OfficeId::new(2)), "north", FranchiseId::new(1)).unwrap(),
                Office::new(Some(OfficeId::new(2)), "south", FranchiseId::new(1)).unwrap(),
            ],
            ..Snapshot::default()
        };

        let err = InMemoryStore::from_snapshot(snapshot).err().unwrap();
        assert!(err.to_string().contains("duplicate office id 2"));
    }

    #[test]
    fn snapshot_with_duplicate_names_is_rejected() {
        let snapshot = Snapshot {
            products: vec![
                Product::new(Some(ProductId::new(1)), "widget", 1, OfficeId::new(1)).unwrap(),
                Product::new(Some(ProductId::new(2)), " Widget", 4, OfficeId::new(2)).unwrap(),
            ],
            ..Snapshot::default()
        };

        let err = InMemoryStore::from_snapshot(snapshot).err().unwrap();
        assert!(err.to_string().contains("reuses the name [WIDGET]"));
    }
}
