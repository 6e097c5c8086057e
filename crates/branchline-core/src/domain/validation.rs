use crate::domain::{
    entities::{Franchise, FranchiseInput, Office, OfficeInput, Product, ProductInput},
    error::DomainError,
};

/// Centralized entity validation.
///
/// Turns raw caller fields into normalized entities. Pure: no I/O and no
/// dependency on prior state, so it always runs before any port is touched.
pub struct DomainValidator;

impl DomainValidator {
    pub fn franchise(input: FranchiseInput) -> Result<Franchise, DomainError> {
        Franchise::try_from(input)
    }

    pub fn office(input: OfficeInput) -> Result<Office, DomainError> {
        Office::try_from(input)
    }

    pub fn product(input: ProductInput) -> Result<Product, DomainError> {
        Product::try_from(input)
    }
}
