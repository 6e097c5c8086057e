pub mod common;
pub mod franchise;
pub mod office;
pub mod product;

pub use crate::domain::DomainError;
pub use common::EntityName;
pub use franchise::{Franchise, FranchiseDetail, FranchiseInput};
pub use office::{Office, OfficeInput};
pub use product::{Product, ProductInput};
