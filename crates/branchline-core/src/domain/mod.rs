// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Branchline.
//!
//! This module contains pure business logic with ZERO I/O.
//! Persistence is reached only through the ports defined in the application
//! layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or storage calls
//! - **No logging**: Observability lives in the application and CLI layers
//! - **Immutable entities**: "update" means validate-then-replace
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod ranking;
pub mod value_objects;

mod validation;

// Re-exports for convenience
pub use entities::{
    EntityName, Franchise, FranchiseDetail, FranchiseInput, Office, OfficeInput, Product,
    ProductInput,
};

pub use error::DomainError;

pub use value_objects::{EntityKind, FranchiseId, OfficeId, ParentRef, ProductId};

pub use ranking::top_stock_per_office;
pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Name normalization across every entity kind
    // ========================================================================

    #[test]
    fn blank_names_fail_for_every_kind() {
        for raw in [None, Some(""), Some("   ")] {
            let name = raw.map(str::to_string);

            assert!(
                DomainValidator::franchise(FranchiseInput {
                    id: None,
                    name: name.clone(),
                })
                .is_err()
            );
            assert!(
                DomainValidator::office(OfficeInput {
                    id: None,
                    name: name.clone(),
                    franchise_id: Some(1),
                })
                .is_err()
            );
            assert!(
                DomainValidator::product(ProductInput {
                    id: None,
                    name,
                    stock: Some(1),
                    office_id: Some(1),
                })
                .is_err()
            );
        }
    }

    #[test]
    fn stored_form_is_trimmed_upper_case() {
        for (raw, expected) in [("acme", "ACME"), (" Acme Inc ", "ACME INC"), ("ñandú", "ÑANDÚ")] {
            let franchise = DomainValidator::franchise(FranchiseInput {
                id: None,
                name: Some(raw.into()),
            })
            .unwrap();
            let office = Office::new(None, raw, FranchiseId::new(1)).unwrap();
            let product = Product::new(None, raw, 0, OfficeId::new(1)).unwrap();

            assert_eq!(franchise.name().as_str(), expected);
            assert_eq!(office.name().as_str(), expected);
            assert_eq!(product.name().as_str(), expected);
        }
    }

    // ========================================================================
    // Required references
    // ========================================================================

    #[test]
    fn product_requires_office_and_stock() {
        let missing_office = DomainValidator::product(ProductInput {
            id: None,
            name: Some("widget".into()),
            stock: Some(1),
            office_id: None,
        });
        assert_eq!(
            missing_office,
            Err(DomainError::MissingRequiredField { field: "office_id" })
        );

        let negative = DomainValidator::product(ProductInput {
            id: None,
            name: Some("widget".into()),
            stock: Some(-1),
            office_id: Some(1),
        });
        assert!(matches!(negative, Err(DomainError::NegativeStock { .. })));
    }

    #[test]
    fn validation_errors_carry_suggestions() {
        let err = DomainError::NegativeStock { stock: -1 };
        assert!(!err.suggestions().is_empty());
    }
}
