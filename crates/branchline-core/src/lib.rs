//! Branchline Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Branchline
//! franchise catalogue, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          branchline-cli (CLI)           │
//! │       (Drives the application)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (Franchise/Office/ProductService, plus  │
//! │  uniqueness and hierarchy guards)       │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Franchise/Office/ProductRepository)    │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    branchline-adapters (Storage)        │
//! │    (InMemoryStore, JsonFileStore)       │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │   (Franchise, Office, Product, ranking) │
//! │        No I/O, no async                 │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use branchline_core::prelude::*;
//!
//! // Repositories come from an adapter crate.
//! let catalog = Catalog::new(franchises, offices, products);
//!
//! let acme = catalog
//!     .franchises
//!     .create(Franchise::new(None, "Acme")?)
//!     .await?;
//! assert_eq!(acme.name().as_str(), "ACME");
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, Catalog, FranchiseService, OfficeService, ProductService,
        ports::{FranchiseRepository, NameLookup, OfficeRepository, ProductRepository},
    };
    pub use crate::domain::{
        DomainError, DomainValidator, EntityKind, EntityName, Franchise, FranchiseDetail,
        FranchiseId, FranchiseInput, Office, OfficeId, OfficeInput, ParentRef, Product,
        ProductId, ProductInput,
    };
    pub use crate::error::{BranchlineError, BranchlineResult, ErrorCategory};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
