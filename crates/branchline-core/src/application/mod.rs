//! Application layer for Branchline.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (FranchiseService, OfficeService, ProductService)
//! - **Guards**: Consistency rules that need storage (uniqueness, hierarchy, identity)
//! - **Ports**: Interface definitions (traits) for storage
//! - **Errors**: Application-specific error types
//!
//! Field-level rules live in `crate::domain`; this layer adds the rules that
//! can only be decided by asking storage.

pub mod error;
pub mod guards;
pub mod ports;
pub mod services;

pub use services::{Catalog, FranchiseService, OfficeService, ProductService};

pub use guards::{HierarchyChecker, NameCheck, UniquenessGuard};

// Re-export port traits (for adapter implementation)
pub use ports::{FranchiseRepository, NameLookup, OfficeRepository, ProductRepository};

pub use error::ApplicationError;
