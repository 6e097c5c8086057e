//! Top-stock selection.
//!
//! Given the products of a franchise, keep exactly one product per office:
//! the one with the highest stock. Ties go to the lowest product id, and
//! products without an id (never persisted) lose every tie. Offices without
//! products produce no row. The result is ordered by office id.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::domain::{entities::Product, value_objects::OfficeId};

/// Pick the top-stock product of every office present in `products`.
pub fn top_stock_per_office<I>(products: I) -> Vec<Product>
where
    I: IntoIterator<Item = Product>,
{
    let mut best: BTreeMap<OfficeId, Product> = BTreeMap::new();

    for product in products {
        match best.get(&product.office_id()) {
            Some(current) if !outranks(&product, current) => {}
            _ => {
                best.insert(product.office_id(), product);
            }
        }
    }

    best.into_values().collect()
}

/// Whether `candidate` should replace `current` as its office's top product.
fn outranks(candidate: &Product, current: &Product) -> bool {
    match candidate.stock().cmp(&current.stock()) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => match (candidate.id(), current.id()) {
            (Some(a), Some(b)) => a < b,
            (Some(_), None) => true,
            (None, _) => false,
        },
    }
}
