//! End-to-end flows: services wired against the in-memory store.

use branchline_adapters::InMemoryStore;
use branchline_core::prelude::*;

async fn seeded() -> (Catalog, FranchiseId, OfficeId, OfficeId) {
    let catalog = InMemoryStore::new().catalog();

    let acme = catalog
        .franchises
        .create(Franchise::new(None, "Acme").unwrap())
        .await
        .unwrap();
    let franchise_id = acme.id().unwrap();

    let north = catalog
        .offices
        .create(Office::new(None, "north", franchise_id).unwrap())
        .await
        .unwrap();
    let south = catalog
        .offices
        .create(Office::new(None, "south", franchise_id).unwrap())
        .await
        .unwrap();

    (catalog, franchise_id, north.id().unwrap(), south.id().unwrap())
}

async fn add_product(catalog: &Catalog, name: &str, stock: i64, office: OfficeId) -> Product {
    catalog
        .products
        .create(Product::new(None, name, stock, office).unwrap())
        .await
        .unwrap()
}

fn conflict_kind(err: &BranchlineError) -> Option<EntityKind> {
    match err {
        BranchlineError::Application(ApplicationError::NameConflict { kind, .. }) => Some(*kind),
        _ => None,
    }
}

#[tokio::test]
async fn names_collide_after_normalization() {
    let catalog = InMemoryStore::new().catalog();

    let acme = catalog
        .franchises
        .create(Franchise::new(None, "Acme").unwrap())
        .await
        .unwrap();
    assert_eq!(acme.name().as_str(), "ACME");

    let err = catalog
        .franchises
        .create(Franchise::new(None, "acme ").unwrap())
        .await
        .unwrap_err();

    assert_eq!(conflict_kind(&err), Some(EntityKind::Franchise));
    assert_eq!(err.to_string(), "franchise with the name [ACME] already exists");
}

#[tokio::test]
async fn franchise_detail_lists_its_offices() {
    let (catalog, franchise_id, north, south) = seeded().await;

    let detail = catalog.franchises.get(franchise_id).await.unwrap();
    let office_ids: Vec<_> = detail.offices.iter().filter_map(Office::id).collect();

    assert_eq!(office_ids, vec![north, south]);
    assert_eq!(
        catalog.franchises.list_offices_of(franchise_id).await.unwrap().len(),
        2
    );
}

#[tokio::test]
async fn renaming_to_own_name_is_allowed() {
    let (catalog, franchise_id, _, _) = seeded().await;

    let same = catalog
        .franchises
        .update(
            franchise_id,
            Franchise::new(Some(franchise_id), " acme").unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(same.name().as_str(), "ACME");
}

#[tokio::test]
async fn renaming_onto_another_office_conflicts() {
    let (catalog, franchise_id, north, _) = seeded().await;

    let err = catalog
        .offices
        .update(north, Office::new(Some(north), "South", franchise_id).unwrap())
        .await
        .unwrap_err();

    assert_eq!(conflict_kind(&err), Some(EntityKind::Office));
}

#[tokio::test]
async fn child_under_missing_parent_is_not_created() {
    let (catalog, _, _, _) = seeded().await;

    let err = catalog
        .offices
        .create(Office::new(None, "x", FranchiseId::new(999)).unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "franchise 999 not found");

    let err = catalog
        .products
        .create(Product::new(None, "widget", 1, OfficeId::new(999)).unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "office 999 not found");

    let store_was_untouched = catalog
        .franchises
        .list_offices_of(FranchiseId::new(999))
        .await
        .unwrap()
        .is_empty();
    assert!(store_was_untouched);
}

#[tokio::test]
async fn mismatched_update_leaves_record_alone() {
    let (catalog, _, north, _) = seeded().await;
    let widget = add_product(&catalog, "widget", 3, north).await;
    let id = widget.id().unwrap();

    let err = catalog
        .products
        .update(
            ProductId::new(id.get() + 100),
            Product::new(Some(id), "widget", 50, north).unwrap(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.status_equivalent(), 400);
    assert_eq!(catalog.products.get(id).await.unwrap().stock(), 3);
}

#[tokio::test]
async fn deleting_twice_reports_not_found() {
    let (catalog, _, north, _) = seeded().await;
    let widget = add_product(&catalog, "widget", 3, north).await;
    let id = widget.id().unwrap();

    catalog.products.delete(id).await.unwrap();
    let err = catalog.products.delete(id).await.unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn top_stock_per_office_breaks_ties_by_lowest_id() {
    let (catalog, franchise_id, north, south) = seeded().await;

    let p1 = add_product(&catalog, "p1", 5, north).await;
    let p2 = add_product(&catalog, "p2", 10, south).await;
    let _p3 = add_product(&catalog, "p3", 10, south).await;

    let top = catalog
        .products
        .top_stock_by_franchise(franchise_id)
        .await
        .unwrap();

    assert_eq!(top.len(), 2);
    assert_eq!(top[0].id(), p1.id());
    assert_eq!(top[1].id(), p2.id());
}

#[tokio::test]
async fn top_stock_ignores_other_franchises_and_empty_offices() {
    let (catalog, franchise_id, north, _) = seeded().await;
    let other = catalog
        .franchises
        .create(Franchise::new(None, "Globex").unwrap())
        .await
        .unwrap();
    let other_office = catalog
        .offices
        .create(Office::new(None, "east", other.id().unwrap()).unwrap())
        .await
        .unwrap();

    add_product(&catalog, "local", 1, north).await;
    add_product(&catalog, "remote", 1000, other_office.id().unwrap()).await;

    let top = catalog
        .products
        .top_stock_by_franchise(franchise_id)
        .await
        .unwrap();

    assert_eq!(top.len(), 1);
    assert_eq!(top[0].name().as_str(), "LOCAL");

    let none = catalog
        .products
        .top_stock_by_franchise(FranchiseId::new(404))
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_store_one_record_per_name() {
    let store = InMemoryStore::new();
    let catalog = store.catalog();

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let catalog = catalog.clone();
            tokio::spawn(async move {
                catalog
                    .franchises
                    .create(Franchise::new(None, "Acme").unwrap())
                    .await
            })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(err) => assert_eq!(conflict_kind(&err), Some(EntityKind::Franchise)),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(store.snapshot().unwrap().franchises.len(), 1);
}
